//! Per-language code generation modules.

pub mod c;
pub mod csharp;
pub mod java;
pub mod rust;
pub mod script;

pub use c::{CHeaderGenerator, CSourceGenerator, LookupKind};
pub use csharp::CSharpGenerator;
pub use java::JavaGenerator;
pub use rust::RustGenerator;
pub use script::{JsConstantsGenerator, WidlGenerator};
