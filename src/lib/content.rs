//! Static content shown on the TripMind pages.

use crate::*;

/// One of the popular cities pinned on the default world map.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetDestination {
    pub name: &'static str,
    pub coordinates: Coordinates,
    pub country: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
}

pub static PRESET_DESTINATIONS: [PresetDestination; 6] = [
    PresetDestination {
        name: "Paris",
        coordinates: Coordinates::new(48.8566, 2.3522),
        country: "France",
        description: "City of Light & Romance",
        emoji: "🗼",
    },
    PresetDestination {
        name: "Tokyo",
        coordinates: Coordinates::new(35.6895, 139.6917),
        country: "Japan",
        description: "Modern meets Traditional",
        emoji: "🗾",
    },
    PresetDestination {
        name: "New York",
        coordinates: Coordinates::new(40.7128, -74.0060),
        country: "USA",
        description: "The City That Never Sleeps",
        emoji: "🗽",
    },
    PresetDestination {
        name: "Dubai",
        coordinates: Coordinates::new(25.2048, 55.2708),
        country: "UAE",
        description: "Luxury & Innovation",
        emoji: "🏙️",
    },
    PresetDestination {
        name: "Sydney",
        coordinates: Coordinates::new(-33.8688, 151.2093),
        country: "Australia",
        description: "Harbor City Beauty",
        emoji: "🦘",
    },
    PresetDestination {
        name: "London",
        coordinates: Coordinates::new(51.5074, -0.1276),
        country: "UK",
        description: "Historic Royal Capital",
        emoji: "🏰",
    },
];

/// Looks up a preset destination by name, ignoring case.
pub fn find_preset(name: &str) -> Option<&'static PresetDestination> {
    let name = name.trim();
    PRESET_DESTINATIONS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Hand written facts for the destinations featured on the detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationFacts {
    pub name: &'static str,
    pub region: &'static str,
    pub capital: &'static str,
    pub population: &'static str,
    pub language: &'static str,
    pub currency: &'static str,
    pub best_time: &'static str,
    pub culture: &'static str,
    pub attractions: &'static [&'static str],
    pub cuisine: &'static [&'static str],
    pub festivals: &'static [&'static str],
    pub tips: &'static str,
}

pub static DESTINATION_FACTS: [DestinationFacts; 6] = [
    DestinationFacts {
        name: "Nepal",
        region: "Asia",
        capital: "Kathmandu",
        population: "29M",
        language: "Nepali",
        currency: "Nepalese Rupee (NPR)",
        best_time: "October to December",
        culture: "Nepal is known for its rich cultural heritage, ancient temples, and warm hospitality. The country is the birthplace of Lord Buddha and home to many UNESCO World Heritage Sites.",
        attractions: &[
            "Mount Everest - Highest peak in the world",
            "Pokhara Valley - Beautiful lakes and mountains",
            "Pashupatinath Temple - Sacred Hindu temple",
            "Boudhanath Stupa - Largest stupa in Nepal",
            "Chitwan National Park - Wildlife and jungle safaris",
        ],
        cuisine: &[
            "Dal Bhat - Traditional lentil soup with rice",
            "Momos - Steamed dumplings",
            "Thukpa - Noodle soup",
            "Sel Roti - Sweet rice bread",
            "Gundruk - Fermented leafy greens",
        ],
        festivals: &["Dashain", "Tihar", "Holi", "Buddha Jayanti"],
        tips: "Respect local customs, dress modestly at temples, carry cash as cards may not be accepted everywhere.",
    },
    DestinationFacts {
        name: "United Kingdom",
        region: "Europe",
        capital: "London",
        population: "67M",
        language: "English",
        currency: "British Pound (GBP)",
        best_time: "May to September",
        culture: "The UK has a rich history spanning centuries, from medieval castles to modern innovation. Known for tea culture, royal heritage, and diverse multicultural communities.",
        attractions: &[
            "Big Ben & Houses of Parliament - Iconic London landmarks",
            "Buckingham Palace - Royal residence",
            "Stonehenge - Ancient stone circle",
            "Edinburgh Castle - Historic fortress",
            "Lake District - Scenic natural beauty",
        ],
        cuisine: &[
            "Fish and Chips - Classic British dish",
            "Sunday Roast - Traditional meal",
            "Afternoon Tea - Tea with scones and cakes",
            "Full English Breakfast - Hearty morning meal",
            "Shepherd's Pie - Meat and potato dish",
        ],
        festivals: &[
            "Notting Hill Carnival",
            "Edinburgh Fringe",
            "Glastonbury",
            "Bonfire Night",
        ],
        tips: "Weather can be unpredictable, always carry an umbrella. Public transport is excellent in major cities.",
    },
    DestinationFacts {
        name: "Qatar",
        region: "Asia",
        capital: "Doha",
        population: "2.8M",
        language: "Arabic",
        currency: "Qatari Riyal (QAR)",
        best_time: "November to April",
        culture: "Qatar blends traditional Bedouin culture with ultra-modern development. Known for Islamic architecture, pearl diving heritage, and warm Arab hospitality.",
        attractions: &[
            "Museum of Islamic Art - Stunning architecture",
            "Souq Waqif - Traditional marketplace",
            "The Pearl-Qatar - Luxury island",
            "Katara Cultural Village - Arts and culture",
            "Desert Safari - Dune bashing experience",
        ],
        cuisine: &[
            "Machboos - Spiced rice with meat",
            "Harees - Wheat and meat dish",
            "Luqaimat - Sweet dumplings",
            "Balaleet - Sweet vermicelli",
            "Madrouba - Creamy rice porridge",
        ],
        festivals: &["Eid al-Fitr", "Eid al-Adha", "Qatar National Day", "Ramadan"],
        tips: "Dress modestly, avoid public displays of affection, and respect prayer times. Summer is extremely hot.",
    },
    DestinationFacts {
        name: "France",
        region: "Europe",
        capital: "Paris",
        population: "65M",
        language: "French",
        currency: "Euro (EUR)",
        best_time: "April to June, September to October",
        culture: "France is celebrated for its art, fashion, cuisine, and wine. Known as the cultural heart of Europe with a rich history of philosophy, literature, and revolution.",
        attractions: &[
            "Eiffel Tower - Iconic Paris landmark",
            "Louvre Museum - World's largest art museum",
            "Palace of Versailles - Royal château",
            "French Riviera - Mediterranean coastline",
            "Mont Saint-Michel - Island abbey",
        ],
        cuisine: &[
            "Croissants & Baguettes - French bread",
            "Coq au Vin - Chicken in wine",
            "Ratatouille - Vegetable stew",
            "Crème Brûlée - Caramelized dessert",
            "Escargots - Snails in garlic butter",
        ],
        festivals: &[
            "Bastille Day",
            "Cannes Film Festival",
            "Tour de France",
            "Fête de la Musique",
        ],
        tips: "Learn basic French phrases, tipping is optional. Museums often have free entry on first Sunday of month.",
    },
    DestinationFacts {
        name: "Japan",
        region: "Asia",
        capital: "Tokyo",
        population: "126M",
        language: "Japanese",
        currency: "Japanese Yen (JPY)",
        best_time: "March to May (Cherry Blossoms), September to November",
        culture: "Japan beautifully balances ancient traditions with cutting-edge technology. Known for tea ceremonies, samurai heritage, anime, and deep respect for nature.",
        attractions: &[
            "Mount Fuji - Sacred mountain",
            "Fushimi Inari Shrine - Thousands of torii gates",
            "Tokyo Skytree - Modern tower",
            "Hiroshima Peace Memorial - Historic site",
            "Arashiyama Bamboo Grove - Bamboo forest",
        ],
        cuisine: &[
            "Sushi & Sashimi - Raw fish delicacies",
            "Ramen - Noodle soup",
            "Tempura - Deep-fried seafood and vegetables",
            "Okonomiyaki - Savory pancake",
            "Matcha - Green tea desserts",
        ],
        festivals: &[
            "Cherry Blossom Festival",
            "Golden Week",
            "Gion Matsuri",
            "Tanabata",
        ],
        tips: "Remove shoes when entering homes, bow when greeting, carry cash as many places don't accept cards.",
    },
    DestinationFacts {
        name: "Australia",
        region: "Oceania",
        capital: "Canberra",
        population: "25M",
        language: "English",
        currency: "Australian Dollar (AUD)",
        best_time: "September to November, March to May",
        culture: "Australia is known for its laid-back lifestyle, beach culture, and Aboriginal heritage. A melting pot of cultures with a strong outdoor and sports tradition.",
        attractions: &[
            "Great Barrier Reef - Largest coral reef",
            "Sydney Opera House - Iconic architecture",
            "Uluru - Sacred rock formation",
            "Great Ocean Road - Coastal drive",
            "Bondi Beach - Famous beach",
        ],
        cuisine: &[
            "Meat Pies - Australian classic",
            "Vegemite - Savory spread",
            "Barramundi - Grilled fish",
            "Lamingtons - Sponge cake",
            "Tim Tams - Chocolate biscuits",
        ],
        festivals: &[
            "Australia Day",
            "Melbourne Cup",
            "Sydney Festival",
            "Vivid Sydney",
        ],
        tips: "Sun protection is essential, tipping is not mandatory. Watch out for wildlife and ocean safety.",
    },
];

/// The destination shown when nothing else can be resolved.
pub const FALLBACK_DESTINATION: &str = "Nepal";

/// Looks up the hand written facts for a destination. Names match exactly.
pub fn find_facts(name: &str) -> Option<&'static DestinationFacts> {
    DESTINATION_FACTS.iter().find(|d| d.name == name)
}

/// A card on the community page.
#[derive(Debug, Clone, PartialEq)]
pub struct CommunityCard {
    pub name: &'static str,
    pub region: &'static str,
    pub capital: &'static str,
    pub population: &'static str,
}

impl CommunityCard {
    pub fn to_summary(&self) -> CountrySummary {
        CountrySummary {
            name: self.name.to_string(),
            region: self.region.to_string(),
            capital: self.capital.to_string(),
            population: self.population.to_string(),
        }
    }
}

pub static COMMUNITY_CARDS: [CommunityCard; 6] = [
    CommunityCard {
        name: "Nepal",
        region: "Asia",
        capital: "Kathmandu",
        population: "29M",
    },
    CommunityCard {
        name: "United Kingdom",
        region: "Europe",
        capital: "London",
        population: "67M",
    },
    CommunityCard {
        name: "Qatar",
        region: "Asia",
        capital: "Doha",
        population: "2.8M",
    },
    CommunityCard {
        name: "France",
        region: "Europe",
        capital: "Paris",
        population: "65M",
    },
    CommunityCard {
        name: "Japan",
        region: "Asia",
        capital: "Tokyo",
        population: "126M",
    },
    CommunityCard {
        name: "Australia",
        region: "Oceania",
        capital: "Canberra",
        population: "25M",
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct TeamMember {
    pub name: &'static str,
    pub role: &'static str,
    pub image: &'static str,
}

pub static TEAM: [TeamMember; 4] = [
    TeamMember {
        name: "Sarah Johnson",
        role: "CEO & Co-Founder",
        image: "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=400&q=80",
    },
    TeamMember {
        name: "Marcus Chen",
        role: "CTO & AI Lead",
        image: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400&q=80",
    },
    TeamMember {
        name: "Emma Rodriguez",
        role: "Head of Product",
        image: "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=400&q=80",
    },
    TeamMember {
        name: "David Kim",
        role: "Lead Designer",
        image: "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=400&q=80",
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

pub static FEATURES: [Feature; 4] = [
    Feature {
        title: "AI Planning",
        description: "Personalized itineraries built around your interests, budget and dates.",
    },
    Feature {
        title: "Real-Time Insights",
        description: "Live weather and local conditions for every stop on your route.",
    },
    Feature {
        title: "Smart Budgeting",
        description: "Keep track of costs and stay within your travel budget.",
    },
    Feature {
        title: "Community Itineraries",
        description: "Discover popular plans from fellow travelers and customize them.",
    },
];

/// A selectable interest on the plan-trip page.
#[derive(Debug, Clone, PartialEq)]
pub struct InterestOption {
    pub id: &'static str,
    pub label: &'static str,
}

pub static INTEREST_OPTIONS: [InterestOption; 8] = [
    InterestOption {
        id: "beach",
        label: "🏖️ Beach",
    },
    InterestOption {
        id: "adventure",
        label: "🏔️ Adventure",
    },
    InterestOption {
        id: "culture",
        label: "🏛️ Culture",
    },
    InterestOption {
        id: "food",
        label: "🍜 Food",
    },
    InterestOption {
        id: "nature",
        label: "🌲 Nature",
    },
    InterestOption {
        id: "shopping",
        label: "🛍️ Shopping",
    },
    InterestOption {
        id: "nightlife",
        label: "🌃 Nightlife",
    },
    InterestOption {
        id: "relaxation",
        label: "🧘 Relaxation",
    },
];

pub fn find_interest(id: &str) -> Option<&'static InterestOption> {
    INTEREST_OPTIONS.iter().find(|i| i.id == id)
}

#[test]
fn presets_are_found_regardless_of_case() {
    let tokyo = find_preset(" tokyo ").unwrap();
    assert_eq!(tokyo.country, "Japan");
    assert!(find_preset("Atlantis").is_none());
}

#[test]
fn every_community_card_has_detailed_facts() {
    for card in COMMUNITY_CARDS.iter() {
        let facts = find_facts(card.name).unwrap();
        assert_eq!(facts.capital, card.capital);
        assert_eq!(facts.population, card.population);
    }
    assert!(find_facts(FALLBACK_DESTINATION).is_some());
}
