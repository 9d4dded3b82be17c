pub mod instant_vector;
pub mod label_set;
pub mod modifiers;
pub mod sample;
pub mod sensapp_datetime;
pub mod value;

pub use instant_vector::InstantVector;
pub use label_set::{LabelFilter, LabelSet, Signature};
pub use modifiers::{Cardinality, Grouping, JoinSpec, Modifiers, VectorMatching};
pub use sample::Sample;
pub use sensapp_datetime::{SensAppDateTime, SensAppDateTimeExt};
pub use value::Value;
