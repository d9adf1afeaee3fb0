//! One controller per tab. Each keeps its own view state and exposes the
//! behavior behind its buttons as plain methods, with `show` drawing it.

pub mod builder;
pub mod contact;
pub mod courses;
pub mod directory;
pub mod discover;
pub mod home;
pub mod join;
pub mod routines;
pub mod weather;
pub mod workouts;

pub use builder::RoutineBuilderPage;
pub use contact::ContactPage;
pub use courses::CoursesPage;
pub use directory::DirectoryPage;
pub use discover::DiscoverPage;
pub use home::HomePage;
pub use join::JoinPage;
pub use routines::RoutinesPage;
pub use weather::WeatherWidget;
pub use workouts::WorkoutsPage;
