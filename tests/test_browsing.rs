use thenu_cookbook::session::NavigationState;
use thenu_cookbook::{
    annotate_ingredients, paginate, FileStore, FilterCriteria, PageSize, Recipe, RecipeBrowser,
    SessionStore, Theme,
};

fn recipes(count: usize) -> Vec<Recipe> {
    (1..=count)
        .map(|i| Recipe {
            name: format!("Dish {:02}", i),
            diet: Some("vegetarian".to_string()),
            course: Some(if i % 3 == 0 { "snack" } else { "main course" }.to_string()),
            state: Some("Gujarat".to_string()),
            prep_time: Some((i * 5) as f64),
            ingredients: "Besan, Curd, Mustard Seeds".to_string(),
            ..Default::default()
        })
        .collect()
}

#[test]
fn test_narrowing_from_last_page_resets_to_first() {
    let mut browser = RecipeBrowser::with_page_size(recipes(12), PageSize::Five);
    browser.go_to_page(3);
    let names: Vec<&str> = browser.current_page().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Dish 11", "Dish 12"]);

    browser.set_criteria(FilterCriteria {
        course: Some("Snack".to_string()),
        ..Default::default()
    });

    assert_eq!(browser.total(), 4);
    assert_eq!(browser.page(), 1);
    assert_eq!(browser.current_page().len(), 4);
}

#[test]
fn test_cards_carry_annotations() {
    let mut list = recipes(1);
    list[0].missing_ingredients.missing_ingredients = vec!["mustard seeds".to_string()];

    let browser = RecipeBrowser::new(list);
    let cards = browser.current_cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].missing_count(), 1);
    assert!(cards[0].ingredients[2].is_missing);
    assert_eq!(cards[0].ingredients[2].name, "Mustard Seeds");
}

#[test]
fn test_pages_cover_every_recipe_once() {
    let all = recipes(23);
    let size = PageSize::Ten.get();
    let rebuilt: Vec<Recipe> = (1..=3)
        .flat_map(|page| paginate(&all, page, size).to_vec())
        .collect();
    assert_eq!(rebuilt, all);
}

#[test]
fn test_annotation_example() {
    let annotated = annotate_ingredients("Milk, Sugar, Ghee", &["ghee"]);
    let flags: Vec<(&str, bool)> = annotated
        .iter()
        .map(|i| (i.name.as_str(), i.is_missing))
        .collect();
    assert_eq!(flags, [("Milk", false), ("Sugar", false), ("Ghee", true)]);
}

#[test]
fn test_file_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut session = SessionStore::new(FileStore::new(dir.path()));
        session.remember(&["besan".to_string()], &recipes(3));
        session.set_theme(Theme::Light).unwrap();
    }

    let session = SessionStore::new(FileStore::new(dir.path()));
    let resolved = session.resolve(None);
    assert_eq!(resolved.recipes, recipes(3));
    assert_eq!(resolved.ingredients, vec!["besan"]);
    assert_eq!(session.theme(), Some(Theme::Light));
}

#[test]
fn test_fresh_results_win_over_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = SessionStore::new(FileStore::new(dir.path()));
    session.remember(&["besan".to_string()], &recipes(3));

    let resolved = session.resolve(Some(NavigationState {
        recipes: recipes(1),
        ingredients: vec!["curd".to_string()],
    }));
    assert_eq!(resolved.recipes.len(), 1);
    assert_eq!(resolved.ingredients, vec!["curd"]);
}

#[test]
fn test_corrupt_session_file_reads_empty_and_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    std::fs::write(store.path(), "{ this is not json").unwrap();

    let mut session = SessionStore::new(store);
    assert!(session.filtered_recipes().is_empty());
    assert!(session.selected_ingredients().is_empty());
    assert_eq!(session.theme(), None);

    session.remember(&["curd".to_string()], &recipes(2));
    assert_eq!(session.filtered_recipes().len(), 2);
}

#[test]
fn test_clear_recovers_corrupt_session_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    std::fs::write(store.path(), "{ not json").unwrap();

    let mut session = SessionStore::new(store);
    session.clear().unwrap();

    let session = SessionStore::new(FileStore::new(dir.path()));
    assert!(session.resolve(None).recipes.is_empty());
    assert!(!session.tour_seen());
    assert_eq!(session.theme(), None);
}

#[test]
fn test_clear_removes_search_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = SessionStore::new(FileStore::new(dir.path()));
    session.remember(&["besan".to_string()], &recipes(2));
    session.mark_tour_seen().unwrap();
    session.clear().unwrap();

    let session = SessionStore::new(FileStore::new(dir.path()));
    assert!(session.resolve(None).recipes.is_empty());
    assert!(session.tour_seen());
}
