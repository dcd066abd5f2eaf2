//! # Route Modules
//!
//! | Prefix | Module |
//! |--------|--------|
//! | `/v1/species/*` | [`species`] |
//! | `/v1/population/*` | [`population`] |
//! | `/v1/owners/*`, `/v1/pets/*` | [`pets`] |
//! | `/v1/lifecycle/*` | [`lifecycle`] |

pub mod lifecycle;
pub mod pets;
pub mod population;
pub mod species;
