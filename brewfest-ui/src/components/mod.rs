mod brewery_card;
mod error_display;
mod footer;
mod header;
mod loading_spinner;
mod podium;

pub use brewery_card::BreweryCard;
pub use error_display::ErrorDisplay;
pub use footer::Footer;
pub use header::Header;
pub use loading_spinner::LoadingSpinner;
pub use podium::Podium;
