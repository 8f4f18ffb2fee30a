pub mod agenda;
pub mod calendar;
pub mod resolver;
pub mod slots;

pub use agenda::AgendaService;
