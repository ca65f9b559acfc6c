use rand::seq::SliceRandom;
use rand::Rng;

/// Built-in reference list used when no catalog is configured.
const KNOWN_CITIES: &[&str] = &[
    "Jakarta", "Surabaya", "Bandung", "Medan", "Semarang", "Makassar", "Yogyakarta",
    "Denpasar", "Singapore", "Kuala Lumpur", "Bangkok", "Manila", "Ho Chi Minh City",
    "Hanoi", "Tokyo", "Osaka", "Seoul", "Beijing", "Shanghai", "Hong Kong", "Taipei",
    "Mumbai", "Delhi", "Bangalore", "Karachi", "Dubai", "Istanbul", "Cairo", "Lagos",
    "Nairobi", "Johannesburg", "London", "Manchester", "Dublin", "Paris", "Lyon",
    "Berlin", "Munich", "Hamburg", "Amsterdam", "Brussels", "Madrid", "Barcelona",
    "Lisbon", "Rome", "Milan", "Vienna", "Zurich", "Stockholm", "Oslo", "Copenhagen",
    "Helsinki", "Warsaw", "Prague", "Moscow", "New York", "Los Angeles", "Chicago",
    "Houston", "Toronto", "Vancouver", "Montreal", "Mexico City", "Sao Paulo",
    "Rio de Janeiro", "Buenos Aires", "Santiago", "Lima", "Bogota", "Sydney",
    "Melbourne", "Auckland",
];

/// Explicit list of known city names.
///
/// Used to validate upstream locations and as the sampling pool when a lead
/// arrives without one. Not a geocoder.
#[derive(Debug, Clone, PartialEq)]
pub struct CityCatalog {
    names: Vec<String>,
}

impl Default for CityCatalog {
    fn default() -> Self {
        Self::new(KNOWN_CITIES.iter().map(|c| c.to_string()).collect())
    }
}

impl CityCatalog {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn contains(&self, city: &str) -> bool {
        self.names.iter().any(|name| name == city)
    }

    /// Picks a city uniformly at random, `None` when the catalog is empty.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.names.choose(rng).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
