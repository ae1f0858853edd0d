//! Repositories, one per table. Pool-based methods are plain reads/writes;
//! methods taking a `PgConnection` are meant to run inside
//! [`with_transaction`](crate::tx::with_transaction).

pub mod booking_repo;
pub mod flight_repo;

pub use booking_repo::BookingRepo;
pub use flight_repo::FlightRepo;
