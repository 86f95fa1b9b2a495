pub mod geo;
pub mod geocode;
pub mod heading;
pub mod navigation;
pub mod routing;
pub mod web;

#[cfg(test)]
mod test_utils;
