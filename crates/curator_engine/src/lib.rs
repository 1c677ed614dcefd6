//! Curator engine: remote store access, tag reconciliation and content normalization.
mod catalog;
mod content;
mod convert;
mod decode;
mod fetch;
mod http;
mod locate;
mod reconcile;
mod settings;
mod store;
mod tag;
mod tasks;
mod types;

pub use catalog::TagCatalog;
pub use content::{ContentFetchOrchestrator, ContentResource, ContentSource};
pub use convert::{Converter, MarkdownConverter};
pub use decode::{decode_html, DecodedHtml};
pub use fetch::FetchedPage;
pub use http::RemoteClient;
pub use locate::{ContentRegion, HeuristicLocator, LocateStrategy, Locator};
pub use reconcile::AssociationReconciler;
pub use settings::{ClientSettings, DEFAULT_SERVER_URL};
pub use store::{AssociationStore, HttpAssociationStore};
pub use tag::{Tag, TagPage};
pub use types::{FailureKind, ReconcileError, RemoteError};
