use super::color::Rgb;

/// Stable identifier of a `GeoEvent`
pub type EventId = u32;

/// Marker color for events whose category tag is not recognized
pub const DEFAULT_MARKER_COLOR: Rgb = Rgb::hex(0xa1a1aa);

/// Event category tag. Unrecognized tags are kept as `Other` rather than
/// rejected, and render with `DEFAULT_MARKER_COLOR`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Ritual,
    Sacrifice,
    War,
    Political,
    Target,
    Gathering,
    Other(&'static str),
}

impl Category {
    /// The six known categories, in legend order
    pub const KNOWN: [Category; 6] = [
        Category::Ritual,
        Category::Sacrifice,
        Category::War,
        Category::Political,
        Category::Target,
        Category::Gathering,
    ];

    pub fn parse(tag: &'static str) -> Self {
        match tag {
            "ritual" => Category::Ritual,
            "sacrifice" => Category::Sacrifice,
            "war" => Category::War,
            "political" => Category::Political,
            "target" => Category::Target,
            "gathering" => Category::Gathering,
            other => Category::Other(other),
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Category::Ritual => "ritual",
            Category::Sacrifice => "sacrifice",
            Category::War => "war",
            Category::Political => "political",
            Category::Target => "target",
            Category::Gathering => "gathering",
            Category::Other(tag) => tag,
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Category::Ritual => Rgb::hex(0xf59e0b),
            Category::Sacrifice => Rgb::hex(0xef4444),
            Category::War => Rgb::hex(0xdc2626),
            Category::Political => Rgb::hex(0x8b5cf6),
            Category::Target => Rgb::hex(0x3b82f6),
            Category::Gathering => Rgb::hex(0x22c55e),
            Category::Other(_) => DEFAULT_MARKER_COLOR,
        }
    }
}

/// A labeled point of interest on the map
#[derive(Clone, Debug, PartialEq)]
pub struct GeoEvent {
    pub id: EventId,
    pub name: &'static str,
    /// (longitude, latitude) in degrees
    pub coords: (f64, f64),
    pub year: &'static str,
    pub label: &'static str,
    pub category: Category,
    pub description: &'static str,
}

pub static EVENTS: [GeoEvent; 9] = [
    GeoEvent {
        id: 1,
        name: "Trinity Test",
        coords: (-106.5, 33.7),
        year: "Jul 16, 1945",
        label: "First Atomic Test",
        category: Category::Ritual,
        description: "The first detonation of a nuclear device, carried out by the Manhattan Project \
                      on the Alamogordo Bombing Range in the Jornada del Muerto desert of New Mexico.",
    },
    GeoEvent {
        id: 2,
        name: "Dallas",
        coords: (-96.8, 32.8),
        year: "Nov 22, 1963",
        label: "Kennedy Assassination",
        category: Category::Sacrifice,
        description: "President John F. Kennedy was shot and killed while riding in a motorcade \
                      through Dealey Plaza in downtown Dallas, Texas.",
    },
    GeoEvent {
        id: 3,
        name: "Nagasaki",
        coords: (129.9, 32.7),
        year: "Aug 9, 1945",
        label: "Second Atomic Bombing",
        category: Category::Ritual,
        description: "A plutonium bomb was dropped on Nagasaki three days after Hiroshima. \
                      Japan announced its surrender six days later.",
    },
    GeoEvent {
        id: 4,
        name: "Casablanca",
        coords: (-7.6, 33.6),
        year: "Jan 1943",
        label: "Allied Conference",
        category: Category::Political,
        description: "Roosevelt and Churchill met at Anfa to plan Allied strategy for 1943 and \
                      announced that the Axis powers would be required to surrender unconditionally.",
    },
    GeoEvent {
        id: 5,
        name: "Baghdad",
        coords: (44.4, 33.3),
        year: "2003",
        label: "Invasion of Iraq",
        category: Category::War,
        description: "A US-led coalition invaded Iraq in March 2003 and Baghdad fell within three \
                      weeks. The ruins of ancient Babylon lie about 85 km to the south.",
    },
    GeoEvent {
        id: 6,
        name: "Damascus",
        coords: (36.3, 33.5),
        year: "2011–Present",
        label: "Syrian Civil War",
        category: Category::War,
        description: "Protests in 2011 escalated into a multi-sided civil war that displaced more \
                      than half of Syria's pre-war population.",
    },
    GeoEvent {
        id: 7,
        name: "Jerusalem",
        coords: (35.2, 31.8),
        year: "Ancient–Present",
        label: "Holy City",
        category: Category::Target,
        description: "One of the oldest continuously inhabited cities in the world, held sacred \
                      in Judaism, Christianity and Islam.",
    },
    GeoEvent {
        id: 8,
        name: "Gaza",
        coords: (34.5, 31.5),
        year: "2023–Present",
        label: "Gaza War",
        category: Category::War,
        description: "The attacks on southern Israel on 7 October 2023 were followed by an Israeli \
                      military campaign in the Gaza Strip and a severe humanitarian crisis.",
    },
    GeoEvent {
        id: 9,
        name: "Tel Aviv",
        coords: (34.8, 32.1),
        year: "May 14, 1948",
        label: "Declaration of Independence",
        category: Category::Gathering,
        description: "The Israeli Declaration of Independence was read at the Tel Aviv Museum \
                      on Rothschild Boulevard, now known as Independence Hall.",
    },
];

/// Format a coordinate as `31.8°N 35.2°E`: absolute values, with the sign of
/// each axis choosing the hemisphere suffix.
pub fn format_coords(lon: f64, lat: f64) -> String {
    format!(
        "{:.1}°{} {:.1}°{}",
        lat.abs(),
        if lat >= 0.0 { "N" } else { "S" },
        lon.abs(),
        if lon >= 0.0 { "E" } else { "W" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_unique() {
        let ids: HashSet<_> = EVENTS.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), EVENTS.len());
    }

    #[test]
    fn test_all_events_have_known_category() {
        for e in &EVENTS {
            assert!(Category::KNOWN.contains(&e.category), "{} has {:?}", e.name, e.category);
        }
    }

    #[test]
    fn test_parse_round_trips_tags() {
        for c in Category::KNOWN {
            assert_eq!(Category::parse(c.tag()), c);
        }
    }

    #[test]
    fn test_unknown_category_uses_default_color() {
        let c = Category::parse("festival");
        assert_eq!(c, Category::Other("festival"));
        assert_eq!(c.tag(), "festival");
        assert_eq!(c.color(), DEFAULT_MARKER_COLOR);
    }

    #[test]
    fn test_format_coords() {
        assert_eq!(format_coords(35.2, 31.8), "31.8°N 35.2°E");
        assert_eq!(format_coords(-106.5, 33.7), "33.7°N 106.5°W");
        assert_eq!(format_coords(151.2, -33.9), "33.9°S 151.2°E");
        assert_eq!(format_coords(0.0, 0.0), "0.0°N 0.0°E");
    }
}
