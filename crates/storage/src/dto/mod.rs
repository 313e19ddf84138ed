pub mod registration;

pub use registration::NewRegistration;
