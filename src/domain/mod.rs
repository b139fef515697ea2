pub mod category;
pub mod common;
pub mod entity;
pub mod invoice;
pub mod series;

pub use category::CategoryTotal;
pub use common::{Amounted, BelongsToCategory, Displayable, NamedEntity};
pub use entity::{Entity, EntityId};
pub use invoice::{Invoice, InvoiceStatus};
pub use series::{TimeSeriesPoint, MONTH_LABELS, QUARTER_LABELS};
