//! Compiled-in geographic reference tables.
//!
//! The data is versioned with the crate and treated as read-only at runtime:
//! county→town tables for the regions the product operates in, flat city
//! lists for regions without county-level data, and town→neighborhood tables
//! where sub-area granularity is supported. Neighborhoods never appear in a
//! town list; they live only in the sub-area lookup.

pub(crate) struct CountyTowns {
    pub(crate) county: &'static str,
    pub(crate) towns: &'static [&'static str],
}

pub(crate) struct Region {
    pub(crate) code: &'static str,
    /// County→town tables; empty when only a flat city list exists.
    pub(crate) counties: &'static [CountyTowns],
    /// Flat fallback list for regions without county-level data.
    pub(crate) cities: &'static [&'static str],
    /// Town → neighborhood-level sub-areas.
    pub(crate) sub_areas: &'static [(&'static str, &'static [&'static str])],
}

pub(crate) fn region(code: &str) -> Option<&'static Region> {
    SUPPORTED_REGIONS.iter().find(|region| region.code == code)
}

/// Canonical two-letter codes and full names for every US state plus DC.
pub(crate) const STATE_CODES: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("DC", "District of Columbia"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

pub(crate) const SUPPORTED_REGIONS: &[Region] = &[
    Region {
        code: "MA",
        counties: &[
            CountyTowns {
                county: "Barnstable",
                towns: &[
                    "Barnstable",
                    "Bourne",
                    "Brewster",
                    "Chatham",
                    "Dennis",
                    "Eastham",
                    "Falmouth",
                    "Harwich",
                    "Mashpee",
                    "Orleans",
                    "Provincetown",
                    "Sandwich",
                    "Truro",
                    "Wellfleet",
                    "Yarmouth",
                ],
            },
            CountyTowns {
                county: "Berkshire",
                towns: &[
                    "Adams",
                    "Becket",
                    "Cheshire",
                    "Dalton",
                    "Great Barrington",
                    "Lanesborough",
                    "Lee",
                    "Lenox",
                    "North Adams",
                    "Pittsfield",
                    "Stockbridge",
                    "Williamstown",
                ],
            },
            CountyTowns {
                county: "Bristol",
                towns: &[
                    "Attleboro",
                    "Dartmouth",
                    "Easton",
                    "Fairhaven",
                    "Fall River",
                    "Mansfield",
                    "New Bedford",
                    "North Attleborough",
                    "Norton",
                    "Seekonk",
                    "Somerset",
                    "Swansea",
                    "Taunton",
                    "Westport",
                ],
            },
            CountyTowns {
                county: "Dukes",
                towns: &[
                    "Aquinnah",
                    "Chilmark",
                    "Edgartown",
                    "Oak Bluffs",
                    "Tisbury",
                    "West Tisbury",
                ],
            },
            CountyTowns {
                county: "Essex",
                towns: &[
                    "Amesbury",
                    "Andover",
                    "Beverly",
                    "Danvers",
                    "Gloucester",
                    "Haverhill",
                    "Ipswich",
                    "Lawrence",
                    "Lynn",
                    "Lynnfield",
                    "Marblehead",
                    "Methuen",
                    "Newburyport",
                    "Peabody",
                    "Salem",
                    "Saugus",
                    "Swampscott",
                ],
            },
            CountyTowns {
                county: "Franklin",
                towns: &[
                    "Bernardston",
                    "Buckland",
                    "Charlemont",
                    "Conway",
                    "Deerfield",
                    "Greenfield",
                    "Montague",
                    "Northfield",
                    "Orange",
                    "Shelburne",
                    "Sunderland",
                    "Whately",
                ],
            },
            CountyTowns {
                county: "Hampden",
                towns: &[
                    "Agawam",
                    "Chicopee",
                    "East Longmeadow",
                    "Holyoke",
                    "Longmeadow",
                    "Ludlow",
                    "Monson",
                    "Palmer",
                    "Springfield",
                    "West Springfield",
                    "Westfield",
                    "Wilbraham",
                ],
            },
            CountyTowns {
                county: "Hampshire",
                towns: &[
                    "Amherst",
                    "Belchertown",
                    "Easthampton",
                    "Granby",
                    "Hadley",
                    "Hatfield",
                    "Northampton",
                    "South Hadley",
                    "Ware",
                    "Williamsburg",
                ],
            },
            CountyTowns {
                county: "Middlesex",
                towns: &[
                    "Arlington",
                    "Bedford",
                    "Belmont",
                    "Burlington",
                    "Cambridge",
                    "Concord",
                    "Everett",
                    "Framingham",
                    "Lexington",
                    "Lowell",
                    "Malden",
                    "Medford",
                    "Melrose",
                    "Natick",
                    "Newton",
                    "Somerville",
                    "Waltham",
                    "Watertown",
                    "Winchester",
                    "Woburn",
                ],
            },
            CountyTowns {
                county: "Nantucket",
                towns: &["Nantucket"],
            },
            CountyTowns {
                county: "Norfolk",
                towns: &[
                    "Braintree",
                    "Brookline",
                    "Canton",
                    "Dedham",
                    "Foxborough",
                    "Franklin",
                    "Milton",
                    "Needham",
                    "Norwood",
                    "Quincy",
                    "Randolph",
                    "Sharon",
                    "Stoughton",
                    "Walpole",
                    "Wellesley",
                    "Westwood",
                    "Weymouth",
                ],
            },
            CountyTowns {
                county: "Plymouth",
                towns: &[
                    "Abington",
                    "Bridgewater",
                    "Brockton",
                    "Carver",
                    "Duxbury",
                    "Hanover",
                    "Hingham",
                    "Kingston",
                    "Marshfield",
                    "Middleborough",
                    "Pembroke",
                    "Plymouth",
                    "Rockland",
                    "Scituate",
                    "Wareham",
                ],
            },
            CountyTowns {
                county: "Suffolk",
                towns: &["Boston", "Chelsea", "Revere", "Winthrop"],
            },
            CountyTowns {
                county: "Worcester",
                towns: &[
                    "Auburn",
                    "Clinton",
                    "Fitchburg",
                    "Gardner",
                    "Grafton",
                    "Holden",
                    "Leominster",
                    "Milford",
                    "Millbury",
                    "Shrewsbury",
                    "Southbridge",
                    "Webster",
                    "Westborough",
                    "Worcester",
                ],
            },
        ],
        cities: &[],
        sub_areas: &[
            (
                "Boston",
                &[
                    "Allston",
                    "Back Bay",
                    "Bay Village",
                    "Beacon Hill",
                    "Brighton",
                    "Charlestown",
                    "Chinatown",
                    "Dorchester",
                    "East Boston",
                    "Fenway",
                    "Hyde Park",
                    "Jamaica Plain",
                    "Mattapan",
                    "Mission Hill",
                    "North End",
                    "Roslindale",
                    "Roxbury",
                    "Seaport",
                    "South Boston",
                    "South End",
                    "West End",
                    "West Roxbury",
                ],
            ),
            (
                "Cambridge",
                &[
                    "Cambridgeport",
                    "East Cambridge",
                    "Harvard Square",
                    "Kendall Square",
                    "Mid-Cambridge",
                    "North Cambridge",
                    "Porter Square",
                    "Riverside",
                    "West Cambridge",
                ],
            ),
        ],
    },
    Region {
        code: "CT",
        counties: &[
            CountyTowns {
                county: "Fairfield",
                towns: &[
                    "Bethel",
                    "Bridgeport",
                    "Danbury",
                    "Darien",
                    "Fairfield",
                    "Greenwich",
                    "New Canaan",
                    "Norwalk",
                    "Ridgefield",
                    "Stamford",
                    "Stratford",
                    "Trumbull",
                    "Westport",
                    "Wilton",
                ],
            },
            CountyTowns {
                county: "Hartford",
                towns: &[
                    "Avon",
                    "Berlin",
                    "Bristol",
                    "East Hartford",
                    "Enfield",
                    "Farmington",
                    "Glastonbury",
                    "Hartford",
                    "Manchester",
                    "New Britain",
                    "Newington",
                    "Simsbury",
                    "Southington",
                    "West Hartford",
                    "Wethersfield",
                    "Windsor",
                ],
            },
            CountyTowns {
                county: "Litchfield",
                towns: &[
                    "Kent",
                    "Litchfield",
                    "New Milford",
                    "Salisbury",
                    "Torrington",
                    "Washington",
                    "Watertown",
                    "Winchester",
                ],
            },
            CountyTowns {
                county: "Middlesex",
                towns: &[
                    "Chester",
                    "Clinton",
                    "Cromwell",
                    "Deep River",
                    "Durham",
                    "East Haddam",
                    "Essex",
                    "Middletown",
                    "Old Saybrook",
                    "Portland",
                ],
            },
            CountyTowns {
                county: "New Haven",
                towns: &[
                    "Branford",
                    "Cheshire",
                    "Guilford",
                    "Hamden",
                    "Madison",
                    "Meriden",
                    "Milford",
                    "New Haven",
                    "North Haven",
                    "Orange",
                    "Wallingford",
                    "Waterbury",
                    "West Haven",
                ],
            },
            CountyTowns {
                county: "New London",
                towns: &[
                    "Colchester",
                    "East Lyme",
                    "Groton",
                    "Ledyard",
                    "Montville",
                    "New London",
                    "Norwich",
                    "Old Lyme",
                    "Stonington",
                    "Waterford",
                ],
            },
            CountyTowns {
                county: "Tolland",
                towns: &[
                    "Andover",
                    "Bolton",
                    "Coventry",
                    "Ellington",
                    "Hebron",
                    "Mansfield",
                    "Somers",
                    "Stafford",
                    "Tolland",
                    "Vernon",
                    "Willington",
                ],
            },
            CountyTowns {
                county: "Windham",
                towns: &[
                    "Ashford",
                    "Brooklyn",
                    "Canterbury",
                    "Chaplin",
                    "Killingly",
                    "Plainfield",
                    "Pomfret",
                    "Putnam",
                    "Thompson",
                    "Windham",
                    "Woodstock",
                ],
            },
        ],
        cities: &[],
        sub_areas: &[],
    },
    Region {
        code: "RI",
        counties: &[],
        cities: &[
            "Barrington",
            "Bristol",
            "Central Falls",
            "Cranston",
            "Cumberland",
            "East Greenwich",
            "East Providence",
            "Narragansett",
            "Newport",
            "North Kingstown",
            "Pawtucket",
            "Providence",
            "South Kingstown",
            "Warwick",
            "Westerly",
            "Woonsocket",
        ],
        sub_areas: &[],
    },
    Region {
        code: "NH",
        counties: &[],
        cities: &[
            "Bedford",
            "Concord",
            "Derry",
            "Dover",
            "Exeter",
            "Hampton",
            "Keene",
            "Laconia",
            "Manchester",
            "Merrimack",
            "Nashua",
            "Portsmouth",
            "Rochester",
            "Salem",
        ],
        sub_areas: &[],
    },
];
