//! Interactors
//!
//! Each interactor implements the business rules of one area by
//! orchestrating repositories and services. They hold their collaborators
//! as trait objects and never see HTTP types.

pub mod contest;
pub mod ranking;
pub mod session;
pub mod user;

pub use contest::ContestInteractor;
pub use ranking::RankingInteractor;
pub use session::SessionInteractor;
pub use user::UserInteractor;
