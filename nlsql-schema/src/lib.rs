pub mod agent;
pub mod coverage;
pub mod favorites;

pub use agent::{AgentTemplateRequest, AgentTemplateResponse};
pub use coverage::CoverageGap;
pub use favorites::{
    FavoriteCreateRequest, FavoriteCreateResponse, FavoriteDeleteResponse, FavoriteItem,
    FavoritesListResponse,
};
