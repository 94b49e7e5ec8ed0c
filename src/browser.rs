use crate::annotate::RecipeCard;
use crate::filter::{filter_recipes, FilterCriteria, FilterOptions};
use crate::model::Recipe;
use crate::pagination::{PageSize, Pagination};

/// A fetched result set plus the user's local filters and current page.
///
/// Recipes never change after construction. Changing the criteria or the
/// page size sends the user back to page 1.
#[derive(Debug, Clone, Default)]
pub struct RecipeBrowser {
    recipes: Vec<Recipe>,
    criteria: FilterCriteria,
    filtered: Vec<Recipe>,
    pagination: Pagination,
}

impl RecipeBrowser {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self::with_page_size(recipes, PageSize::default())
    }

    pub fn with_page_size(recipes: Vec<Recipe>, page_size: PageSize) -> Self {
        let filtered = recipes.clone();
        RecipeBrowser {
            recipes,
            criteria: FilterCriteria::default(),
            filtered,
            pagination: Pagination::new(page_size),
        }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn filtered(&self) -> &[Recipe] {
        &self.filtered
    }

    pub fn total(&self) -> usize {
        self.filtered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn page(&self) -> usize {
        self.pagination.page()
    }

    pub fn page_size(&self) -> PageSize {
        self.pagination.page_size()
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.total())
    }

    /// Filter choices offered for the whole fetched set
    pub fn options(&self) -> FilterOptions {
        FilterOptions::from_recipes(&self.recipes)
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        if criteria != self.criteria {
            self.criteria = criteria;
            self.filtered = filter_recipes(&self.recipes, &self.criteria);
            self.pagination.reset();
        }
        self.pagination.sync(self.filtered.len());
    }

    pub fn reset_filters(&mut self) {
        self.set_criteria(FilterCriteria::default());
        self.pagination.reset();
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.pagination.set_page_size(page_size);
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.pagination.set_page(page, self.filtered.len());
    }

    pub fn current_page(&self) -> &[Recipe] {
        self.pagination.slice(&self.filtered)
    }

    pub fn current_cards(&self) -> Vec<RecipeCard> {
        self.current_page()
            .iter()
            .map(RecipeCard::from_recipe)
            .collect()
    }
}
