//! # hg-core: Foundational Types for HerGenesis
//!
//! Leaf crate of the workspace. Every other `hg-*` crate depends on it; it
//! depends on nothing internal.
//!
//! ## Contents
//!
//! - **Species catalog** (`species.rs`): the closed set of four revivable
//!   species and their immutable reference data.
//! - **Identifiers** (`identity.rs`): `PetId` and `OwnerId` newtypes. No bare
//!   strings or UUIDs cross crate boundaries.
//! - **Timestamps** (`temporal.rs`): UTC-only, seconds precision.
//! - **Amounts** (`amount.rs`): `EthAmount`, decimal ETH parsed into integer
//!   wei. Floats never enter the cost path.
//! - **Errors** (`error.rs`): `HgError` and `ValidationError`.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone` and implement
//!   `Serialize`/`Deserialize` where they cross the wire.

pub mod amount;
pub mod error;
pub mod identity;
pub mod species;
pub mod temporal;

pub use amount::EthAmount;
pub use error::{HgError, ValidationError};
pub use identity::{OwnerId, PetId};
pub use species::{Species, SpeciesData, SPECIES_COUNT};
pub use temporal::Timestamp;
