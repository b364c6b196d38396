pub mod entity;
pub mod repository;
pub mod status;
pub mod value_objects;
pub mod version;

pub use entity::{Article, ArticleUpdate, NewArticle, WrittenContentPatch};
pub use repository::{
    ArticleListFilter, ArticleReadRepository, ArticleVersionRepository, ArticleWriteRepository,
};
pub use status::ArticleStatus;
pub use value_objects::{ArticleDescription, ArticleId, ArticleTitle, SourceUrl, VersionContent};
pub use version::{ArticleVersion, NewArticleVersion};
