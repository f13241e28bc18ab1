use crate::board::{CategoryView, LinkView};
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent,
    CardDescription, CardHeader, CardTitle, Input, Label, Spinner,
};
use crate::state::{AppContext, FlashMessage};
use crate::util::DEFAULT_URL_INPUT;
use leptos::prelude::*;

#[component]
pub fn BookmarksPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let board = app_state.0.board;
    let refreshing = app_state.0.refreshing;

    // Initial load. `refresh` only reads untracked, so this runs once.
    Effect::new(move |_| {
        app_state.refresh();
    });

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto w-full max-w-[1080px] px-4 py-8">
                <div class="mb-4 flex items-center justify-between">
                    <div class="space-y-1">
                        <h1 class="text-xl font-semibold">"Last Visit"</h1>
                        <p class="text-xs text-muted-foreground">"Bookmarks by category"</p>
                    </div>

                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        attr:disabled=move || refreshing.get()
                        on:click=move |_| app_state.refresh()
                    >
                        <span class="inline-flex items-center gap-2">
                            <Show when=move || refreshing.get() fallback=|| ().into_view()>
                                <Spinner />
                            </Show>
                            {move || if refreshing.get() { "Refreshing" } else { "Refresh" }}
                        </span>
                    </Button>
                </div>

                <FlashLine id="below-title" message=app_state.0.title_message />

                <Card class="mt-4">
                    <CardHeader>
                        <CardTitle>"Categories"</CardTitle>
                        <CardDescription>
                            {move || board.with(|b| {
                                format!("{} categories, {} links", b.categories().len(), b.link_count())
                            })}
                        </CardDescription>
                    </CardHeader>

                    <CardContent>
                        <CategoryList />
                    </CardContent>
                </Card>

                <Card class="mt-4">
                    <CardHeader>
                        <CardTitle>"Add a link"</CardTitle>
                        <CardDescription>
                            "The category is created if it does not exist yet."
                        </CardDescription>
                    </CardHeader>

                    <CardContent>
                        <EnterLinkForm />
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}

#[component]
fn FlashLine(
    #[prop(into)] id: String,
    message: RwSignal<Option<FlashMessage>>,
) -> impl IntoView {
    view! {
        <div id=id class="warning">
            {move || {
                message.get().map(|m| view! {
                    <Alert class="border-destructive/30">
                        <AlertDescription class="text-destructive">{m.display_text()}</AlertDescription>
                    </Alert>
                })
            }}
        </div>
    }
}

/// Keyed lists: a board update only touches the rows whose data changed.
#[component]
pub fn CategoryList() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let board = app_state.0.board;

    view! {
        <div id="cat-list" class="flex flex-col gap-4">
            <Show when=move || board.with(|b| b.categories().is_empty())>
                <div class="text-xs text-muted-foreground">"No bookmarks yet."</div>
            </Show>
            <For
                each=move || board.with(|b| b.categories().to_vec())
                key=|category: &CategoryView| category.key.clone()
                children=move |category: CategoryView| {
                    view! { <CategoryItem cat_key=category.key name=category.name /> }
                }
            />
        </div>
    }
}

#[component]
fn CategoryItem(cat_key: String, name: String) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let board = app_state.0.board;

    let open_key = cat_key.clone();
    let confirmation_open = Memo::new(move |_| {
        board.with(|b| b.category(&open_key).is_some_and(|c| c.confirmation_open))
    });

    let toggle_key = cat_key.clone();
    let on_toggle = move |_| {
        board.update(|b| {
            b.toggle_category_confirmation(&toggle_key);
        });
    };

    let panel_key = cat_key.clone();
    let panel_name = name.clone();
    let links_key = cat_key.clone();

    view! {
        <div id=cat_key.clone() class="category rounded-md border px-4 py-3">
            <div class="flex items-center gap-2">
                <span class="text-sm font-medium">{name}</span>
                <span
                    id=format!("elm{cat_key}")
                    class="minusSign cursor-pointer text-xs text-muted-foreground"
                    title="Click to delete"
                    on:click=on_toggle
                >
                    "[-]"
                </span>
            </div>
            {move || {
                confirmation_open.get().then(|| {
                    view! { <CategoryConfirm cat_key=panel_key.clone() name=panel_name.clone() /> }
                })
            }}
            <ul class="mt-2 flex flex-col gap-1">
                <For
                    each=move || {
                        board.with(|b| {
                            b.category(&links_key)
                                .map(|c| c.links.clone())
                                .unwrap_or_default()
                        })
                    }
                    key=|link: &LinkView| link.id.clone()
                    children=move |link: LinkView| {
                        view! { <LinkItem id=link.id name=link.name url=link.url /> }
                    }
                />
            </ul>
        </div>
    }
}

#[component]
fn CategoryConfirm(cat_key: String, name: String) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let cancel_key = cat_key.clone();

    view! {
        <span id=format!("confirm{cat_key}")>
            <div class="delete mt-2 flex items-center gap-2 text-sm">
                "Delete this entire category and all its links? "
                <Button
                    variant=ButtonVariant::Destructive
                    size=ButtonSize::Sm
                    on:click=move |_| app_state.delete_category(name.clone())
                >
                    "Confirm"
                </Button>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Sm
                    on:click=move |_| {
                        app_state.0.board.update(|b| b.close_category_confirmation(&cancel_key))
                    }
                >
                    "Cancel"
                </Button>
            </div>
        </span>
    }
}

/// One link row. Visit count and time are read from the board, so a refresh
/// updates them in place.
#[component]
fn LinkItem(id: String, name: String, url: String) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let board = app_state.0.board;

    let view_id = id.clone();
    let current = Memo::new(move |_| board.with(|b| b.link(&view_id).cloned()));
    let details = move || current.with(|l| l.as_ref().map(LinkView::details).unwrap_or_default());
    let label = move || current.with(|l| l.as_ref().map(LinkView::label).unwrap_or_default());
    let confirmation_open = move || current.with(|l| l.as_ref().is_some_and(|l| l.confirmation_open));

    let (visit_name, visit_url) = (name.clone(), url.clone());
    let on_visit = move |_| app_state.visit_link(visit_name.clone(), visit_url.clone());

    let toggle_id = id.clone();
    let on_toggle = move |_| {
        board.update(|b| {
            b.toggle_link_confirmation(&toggle_id);
        });
    };

    let panel_id = id.clone();

    view! {
        <li id=id.clone() class="list text-sm" title=url.clone() aria-label=label>
            <a
                href=url.clone()
                target="_blank"
                class="text-primary underline-offset-4 hover:underline"
                on:click=on_visit
            >
                {name}
            </a>
            {details}
            " "
            <span
                id=format!("elm{id}")
                class="minusSign cursor-pointer text-xs text-muted-foreground"
                title="Click to delete"
                on:click=on_toggle
            >
                "[-]"
            </span>
            {move || {
                confirmation_open().then(|| view! { <LinkConfirm id=panel_id.clone() /> })
            }}
        </li>
    }
}

#[component]
fn LinkConfirm(id: String) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let delete_id = id.clone();
    let cancel_id = id.clone();

    view! {
        <span id=format!("confirm{id}") class="confirmText">
            <div class="delete mt-1 flex items-center gap-2">
                "Delete this link?"
                <Button
                    variant=ButtonVariant::Destructive
                    size=ButtonSize::Sm
                    on:click=move |_| app_state.delete_link(delete_id.clone())
                >
                    "Confirm"
                </Button>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Sm
                    on:click=move |_| app_state.0.board.update(|b| b.close_link_confirmation(&cancel_id))
                >
                    "Cancel"
                </Button>
            </div>
        </span>
    }
}

#[component]
pub fn EnterLinkForm() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let category: RwSignal<String> = RwSignal::new(String::new());
    let link: RwSignal<String> = RwSignal::new(String::new());
    let url: RwSignal<String> = RwSignal::new(DEFAULT_URL_INPUT.to_string());
    let submitting: RwSignal<bool> = RwSignal::new(false);

    let reset = move || {
        category.set(String::new());
        link.set(String::new());
        url.set(DEFAULT_URL_INPUT.to_string());
    };

    let submit = move || {
        if submitting.get_untracked() {
            return;
        }
        submitting.set(true);
        app_state.create_link_and_cat(
            category.get_untracked(),
            link.get_untracked(),
            url.get_untracked(),
            reset,
            move || submitting.set(false),
        );
    };
    let on_enter = Callback::new(move |_: ()| submit());

    view! {
        <div id="enter-cat" class="flex flex-col gap-4">
            <FlashLine id="above-enter-cat" message=app_state.0.form_message />

            <div class="grid gap-4 sm:grid-cols-3">
                <div class="flex flex-col gap-2">
                    <Label html_for="cat">"Category"</Label>
                    <Input id="cat" name="cat" placeholder="Enter category" bind_value=category on_enter=on_enter />
                </div>
                <div class="flex flex-col gap-2">
                    <Label html_for="link">"Link"</Label>
                    <Input id="link" name="link" placeholder="Enter link" bind_value=link on_enter=on_enter />
                </div>
                <div class="flex flex-col gap-2">
                    <Label html_for="url">"URL"</Label>
                    <Input id="url" name="url" placeholder="Enter URL" bind_value=url on_enter=on_enter />
                </div>
            </div>

            <div class="flex items-center gap-2">
                <Button
                    attr:id="cat-submit"
                    attr:disabled=move || submitting.get()
                    on:click=move |_| submit()
                >
                    <span class="inline-flex items-center gap-2">
                        <Show when=move || submitting.get() fallback=|| ().into_view()>
                            <Spinner />
                        </Show>
                        "Submit"
                    </span>
                </Button>
                <Button
                    attr:id="cancel-cat"
                    variant=ButtonVariant::Outline
                    on:click=move |_| reset()
                >
                    "Cancel"
                </Button>
            </div>
        </div>
    }
}
