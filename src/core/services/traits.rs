use crate::api::models::ListEnvelope;
use crate::error::AppError;
use crate::table::SortDescriptor;
use async_trait::async_trait;

/// Common parameters for listing resources: the fetch descriptor the
/// organization API understands.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    /// Search term to filter results server-side
    pub search: Option<String>,
    /// Sort sequence, serialized as `sort=col:asc,col2:desc`
    pub sort: Vec<SortDescriptor>,
    /// Maximum number of results to return
    pub limit: Option<u32>,
    /// Offset for pagination
    pub offset: Option<u32>,
}

impl ListParams {
    /// Parameters for one page of results, 1-based.
    pub fn for_page(page: u32, limit: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(page.saturating_sub(1) * limit),
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search;
        self
    }

    pub fn with_sort(mut self, sort: Vec<SortDescriptor>) -> Self {
        self.sort = sort;
        self
    }

    /// Query pairs for the list endpoint.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset", offset.to_string()));
        }
        if let Some(search) = &self.search {
            if !search.is_empty() {
                query.push(("search", search.clone()));
            }
        }
        if !self.sort.is_empty() {
            let sort = self
                .sort
                .iter()
                .map(|descriptor| {
                    format!(
                        "{}:{}",
                        descriptor.column_id,
                        if descriptor.descending { "desc" } else { "asc" }
                    )
                })
                .collect::<Vec<_>>()
                .join(",");
            query.push(("sort", sort));
        }
        query
    }
}

/// Trait for services that can list resources
#[async_trait]
pub trait ListService<T> {
    /// List resources matching the given parameters
    async fn list(&self, params: ListParams) -> Result<ListEnvelope<T>, AppError>;
}

/// Trait for services that can retrieve individual resources
#[async_trait]
pub trait GetService<T> {
    /// Get a single resource by ID
    async fn get(&self, id: u32) -> Result<T, AppError>;
}

/// Trait for services that can create resources
#[async_trait]
pub trait CreateService<T, CreateInput> {
    /// Create a new resource
    async fn create(&self, input: CreateInput) -> Result<T, AppError>;
}

/// Trait for services that can update resources
#[async_trait]
pub trait UpdateService<T, UpdateInput> {
    /// Update an existing resource
    async fn update(&self, id: u32, input: UpdateInput) -> Result<T, AppError>;
}

/// Trait for services that can delete resources
#[async_trait]
pub trait DeleteService {
    /// Delete a resource by ID
    async fn delete(&self, id: u32) -> Result<(), AppError>;
}
