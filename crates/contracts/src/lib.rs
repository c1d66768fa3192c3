//! Wire contracts shared by the browser client and the upload bridge server,
//! together with the client-side workflow rules that do not depend on the DOM.

pub mod domain;
pub mod shared;
pub mod system;
