//! In-memory view model of the bookmark board.
//!
//! The page renders straight from a [`Board`]; every fetch is folded in with
//! [`Board::reconcile`], and delete confirmations are plain flags on the views.

use crate::models::{Category, Link};
use crate::util::category_key;
use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LinkView {
    pub id: String,
    pub name: String,
    pub url: String,
    pub num_visits: u64,
    pub date_time: String,
    pub confirmation_open: bool,
}

impl LinkView {
    fn from_link(link: &Link) -> Self {
        Self {
            id: link.id.clone(),
            name: link.name.clone(),
            url: link.url.clone(),
            num_visits: link.num_visits,
            date_time: link.date_time.clone(),
            confirmation_open: false,
        }
    }

    /// Text after the anchor, e.g. `" - 3 - 2024-03-01 10:00"`.
    pub fn details(&self) -> String {
        format!(" - {} - {}", self.num_visits, self.date_time)
    }

    /// Full row label, e.g. `"Site - 0 - t"`.
    pub fn label(&self) -> String {
        format!("{}{}", self.name, self.details())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CategoryView {
    /// `hash(name)` as a string; doubles as the element id.
    pub key: String,
    pub name: String,
    pub confirmation_open: bool,
    pub links: Vec<LinkView>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Board {
    categories: Vec<CategoryView>,
}

impl Board {
    pub fn categories(&self) -> &[CategoryView] {
        &self.categories
    }

    pub fn category(&self, key: &str) -> Option<&CategoryView> {
        self.categories.iter().find(|c| c.key == key)
    }

    pub fn link(&self, id: &str) -> Option<&LinkView> {
        self.categories
            .iter()
            .flat_map(|c| c.links.iter())
            .find(|l| l.id == id)
    }

    pub fn link_count(&self) -> usize {
        self.categories.iter().map(|c| c.links.len()).sum()
    }

    /// Replaces the board contents with freshly fetched data.
    ///
    /// - Categories keep server order; a key seen twice (same name or a hash
    ///   collision) is only rendered once, first name wins.
    /// - Link lists are rebuilt from scratch, so repeated calls never duplicate rows.
    /// - Links with no category, or whose category is not on the board, are dropped.
    /// - Open confirmations survive for categories and links that are still present.
    pub fn reconcile(&mut self, cats: &[Category], links: &[Link]) {
        let open_cats: HashSet<String> = self
            .categories
            .iter()
            .filter(|c| c.confirmation_open)
            .map(|c| c.key.clone())
            .collect();
        let open_links: HashSet<String> = self
            .categories
            .iter()
            .flat_map(|c| c.links.iter())
            .filter(|l| l.confirmation_open)
            .map(|l| l.id.clone())
            .collect();

        let mut next: Vec<CategoryView> = Vec::with_capacity(cats.len());
        let mut index_by_key: HashMap<String, usize> = HashMap::with_capacity(cats.len());

        for cat in cats {
            let key = category_key(&cat.name);
            if index_by_key.contains_key(&key) {
                continue;
            }
            index_by_key.insert(key.clone(), next.len());
            next.push(CategoryView {
                confirmation_open: open_cats.contains(&key),
                key,
                name: cat.name.clone(),
                links: Vec::new(),
            });
        }

        for link in links {
            let Some(owner) = link.category.as_deref() else {
                continue;
            };
            let Some(&idx) = index_by_key.get(&category_key(owner)) else {
                continue;
            };
            let mut view = LinkView::from_link(link);
            view.confirmation_open = open_links.contains(&view.id);
            next[idx].links.push(view);
        }

        self.categories = next;
    }

    /// Opens the delete panel of a category, or closes it if open. Returns the new state.
    pub fn toggle_category_confirmation(&mut self, key: &str) -> bool {
        match self.categories.iter_mut().find(|c| c.key == key) {
            Some(cat) => {
                cat.confirmation_open = !cat.confirmation_open;
                cat.confirmation_open
            }
            None => false,
        }
    }

    pub fn close_category_confirmation(&mut self, key: &str) {
        if let Some(cat) = self.categories.iter_mut().find(|c| c.key == key) {
            cat.confirmation_open = false;
        }
    }

    pub fn toggle_link_confirmation(&mut self, id: &str) -> bool {
        match self.link_mut(id) {
            Some(link) => {
                link.confirmation_open = !link.confirmation_open;
                link.confirmation_open
            }
            None => false,
        }
    }

    pub fn close_link_confirmation(&mut self, id: &str) {
        if let Some(link) = self.link_mut(id) {
            link.confirmation_open = false;
        }
    }

    fn link_mut(&mut self, id: &str) -> Option<&mut LinkView> {
        self.categories
            .iter_mut()
            .flat_map(|c| c.links.iter_mut())
            .find(|l| l.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;

    fn cat(name: &str) -> Category {
        Category {
            name: name.to_string(),
        }
    }

    fn link(category: Option<&str>, name: &str, id: &str) -> Link {
        Link {
            category: category.map(str::to_string),
            name: name.to_string(),
            url: format!("https://{}.com", name.to_lowercase()),
            num_visits: 0,
            date_time: "t".to_string(),
            id: id.to_string(),
        }
    }

    #[test]
    fn test_reconcile_end_to_end_from_wire_bodies() {
        let cats = ApiClient::parse_cats_body(r#"[{"name":"Tech"}]"#).expect("cats should parse");
        let links_body = serde_json::to_string(&vec![
            r#"{"category":"Tech","name":"Site","url":"https://x.com","numVisits":0,"dateTime":"t","id":"1"}"#,
        ])
        .expect("should serialize");
        let links = ApiClient::parse_links_body(&links_body).expect("links should parse");

        let mut board = Board::default();
        board.reconcile(&cats, &links);

        assert_eq!(board.categories().len(), 1);
        let tech = &board.categories()[0];
        assert_eq!(tech.name, "Tech");
        assert_eq!(tech.key, category_key("Tech"));
        assert_eq!(tech.links.len(), 1);
        assert_eq!(tech.links[0].url, "https://x.com");
        assert_eq!(tech.links[0].label(), "Site - 0 - t");
    }

    #[test]
    fn test_reconcile_twice_has_no_duplicates() {
        let cats = vec![cat("Tech"), cat("News")];
        let links = vec![link(Some("Tech"), "Rust", "1"), link(Some("News"), "Paper", "2")];

        let mut board = Board::default();
        board.reconcile(&cats, &links);
        let first = board.clone();
        board.reconcile(&cats, &links);

        assert_eq!(board, first);
        assert_eq!(board.categories().len(), 2);
        assert_eq!(board.link_count(), 2);
    }

    #[test]
    fn test_duplicate_category_names_render_once() {
        let cats = vec![cat("Tech"), cat("Tech")];
        let links = vec![link(Some("Tech"), "Rust", "1")];

        let mut board = Board::default();
        board.reconcile(&cats, &links);

        assert_eq!(board.categories().len(), 1);
        assert_eq!(board.categories()[0].links.len(), 1);
    }

    #[test]
    fn test_orphan_and_null_category_links_are_dropped() {
        let cats = vec![cat("Tech")];
        let links = vec![
            link(Some("Gone"), "Lost", "1"),
            link(None, "Nowhere", "2"),
            link(Some("Tech"), "Kept", "3"),
        ];

        let mut board = Board::default();
        board.reconcile(&cats, &links);

        assert_eq!(board.link_count(), 1);
        assert!(board.link("3").is_some());
        assert!(board.link("1").is_none());
        assert!(board.link("2").is_none());
    }

    #[test]
    fn test_reconcile_keeps_server_order() {
        let cats = vec![cat("b"), cat("a"), cat("c")];
        let mut board = Board::default();
        board.reconcile(&cats, &[]);

        let names: Vec<&str> = board.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_removed_category_disappears() {
        let mut board = Board::default();
        board.reconcile(&[cat("Tech"), cat("News")], &[link(Some("News"), "Paper", "2")]);
        board.reconcile(&[cat("Tech")], &[]);

        assert_eq!(board.categories().len(), 1);
        assert!(board.category(&category_key("News")).is_none());
        assert_eq!(board.link_count(), 0);
    }

    #[test]
    fn test_category_confirmation_toggle_is_reversible() {
        let mut board = Board::default();
        board.reconcile(&[cat("Tech")], &[]);
        let key = category_key("Tech");

        assert!(board.toggle_category_confirmation(&key));
        assert!(!board.toggle_category_confirmation(&key));
        assert!(!board.category(&key).expect("category present").confirmation_open);
    }

    #[test]
    fn test_link_confirmation_toggle_and_cancel() {
        let mut board = Board::default();
        board.reconcile(&[cat("Tech")], &[link(Some("Tech"), "Rust", "1")]);

        assert!(board.toggle_link_confirmation("1"));
        assert!(board.link("1").expect("link present").confirmation_open);

        board.close_link_confirmation("1");
        assert!(!board.link("1").expect("link present").confirmation_open);
    }

    #[test]
    fn test_toggle_unknown_item_is_ignored() {
        let mut board = Board::default();
        board.reconcile(&[cat("Tech")], &[]);
        let before = board.clone();

        assert!(!board.toggle_category_confirmation("nope"));
        assert!(!board.toggle_link_confirmation("nope"));
        board.close_category_confirmation("nope");
        assert_eq!(board, before);
    }

    #[test]
    fn test_open_confirmations_survive_unrelated_refresh() {
        let cats = vec![cat("Tech"), cat("News")];
        let links = vec![link(Some("Tech"), "Rust", "1")];

        let mut board = Board::default();
        board.reconcile(&cats, &links);
        board.toggle_category_confirmation(&category_key("News"));
        board.toggle_link_confirmation("1");

        let mut more_links = links.clone();
        more_links.push(link(Some("News"), "Paper", "2"));
        board.reconcile(&cats, &more_links);

        assert!(board.category(&category_key("News")).expect("present").confirmation_open);
        assert!(board.link("1").expect("present").confirmation_open);
        assert!(!board.link("2").expect("present").confirmation_open);
    }

    #[test]
    fn test_link_label_and_details() {
        let view = LinkView {
            id: "9".to_string(),
            name: "Docs".to_string(),
            url: "https://docs.rs".to_string(),
            num_visits: 12,
            date_time: "2024-03-01 10:00".to_string(),
            confirmation_open: false,
        };
        assert_eq!(view.details(), " - 12 - 2024-03-01 10:00");
        assert_eq!(view.label(), "Docs - 12 - 2024-03-01 10:00");
    }
}
