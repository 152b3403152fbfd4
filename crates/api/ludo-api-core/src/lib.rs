//! ludo-api-core: attribute values and property coercion (host-agnostic)

pub mod coercion;
pub mod color;
pub mod scale;
pub mod value;

pub use coercion::{
    color_property, passthrough_property, scale_property, CoercionError, CoercionRule, PropertyDef,
};
pub use color::Rgba;
pub use scale::Scale;
pub use value::{Value, ValueKind};
