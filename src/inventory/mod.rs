pub mod buyer;
pub mod fallback;
pub mod filter;
pub mod flatten;
mod inventory_error;
pub mod model;
pub mod normalize;
pub mod summary;
pub mod template;

pub use buyer::{open_buyer_editor, save_buyer, BuyerEditor, BuyerForm, CHANNEL_PARTNERS};
pub use filter::{apply_filters, Criteria};
pub use flatten::{flatten, FlatUnit};
pub use inventory_error::InventoryError;
pub use model::{Project, ProjectChoice, Unit, UnitStatus, Variant};
pub use normalize::normalize;
pub use summary::{summarize, Summary};
pub use template::{TemplatePatch, TemplateStore};
