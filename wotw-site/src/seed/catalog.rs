//! Built-in weed catalog

use super::{HeaderSeed, NameSeed, PhotoSeed, SeedSet, WeedSeed};

const BANNER_IMAGE_URL: &str = "https://images.unsplash.com/photo-1631163468569-b5265125d578?ixlib=rb-1.2.1\
    &ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=1470&q=80";

impl SeedSet {
    /// Current edition: yellow rocket and oxeye daisy, with an announcement
    pub fn builtin() -> Self {
        Self {
            header: header(Some(
                "<p><strong>Garden yellowrocket is blooming now.</strong> \
                 Pull it before the seed pods ripen.</p>",
            )),
            weeds: vec![yellow_rocket(1), oxeye_daisy(2)],
        }
    }

    /// First edition: oxeye daisy only, no announcement
    pub fn first_edition() -> Self {
        Self {
            header: header(None),
            weeds: vec![oxeye_daisy(1)],
        }
    }
}

fn header(announcement: Option<&str>) -> HeaderSeed {
    HeaderSeed {
        image_url: BANNER_IMAGE_URL.to_string(),
        title: "Weed of the Week".to_string(),
        subtitle: "These invasives have to go!".to_string(),
        announcement: announcement.map(str::to_string),
    }
}

fn yellow_rocket(display_order: i64) -> WeedSeed {
    WeedSeed {
        scientific_name: "Barbarea vulgaris".to_string(),
        description: "A member of the mustard family with clusters of small, bright yellow \
                      flowers, each with four petals. The basal leaves are glossy, dark green \
                      and deeply lobed, with a large rounded lobe at the tip. Flowering stems \
                      grow to a height of 1 to 2 feet."
            .to_string(),
        removal_method: "Pull or dig the plant out, taking as much of the taproot as you can. \
                         A trowel helps when the ground is dry. Remove plants before the long, \
                         narrow seed pods ripen, and put flowering plants in a yard waste bag \
                         so they cannot drop seed on the property."
            .to_string(),
        comments: "This is a biennial or short-lived perennial from Eurasia. It is one of the \
                   first plants to bloom in spring, so it is easy to spot from a distance. A \
                   single plant can produce thousands of seeds."
            .to_string(),
        location_desc: "Scattered along the edge of the lawn beside the driveway, with a dense \
                        patch near the culvert at the north end of the ditch."
            .to_string(),
        location_map: "images/YellowRocket-20220410.png".to_string(),
        display_order,
        common_names: vec![
            NameSeed::primary("garden yellowrocket"),
            NameSeed::alternate("yellow rocket"),
            NameSeed::alternate("wintercress"),
            NameSeed::alternate("bittercress"),
            NameSeed::alternate("rocketcress"),
        ],
        photos: vec![
            PhotoSeed {
                url: "images/YellowRocket-1.jpg".to_string(),
                caption: "Clusters of four-petaled yellow flowers".to_string(),
                display_order: 1,
            },
            PhotoSeed {
                url: "images/YellowRocket-2.jpg".to_string(),
                caption: "Glossy, lobed basal leaves".to_string(),
                display_order: 2,
            },
        ],
    }
}

fn oxeye_daisy(display_order: i64) -> WeedSeed {
    WeedSeed {
        scientific_name: "Leucanthemum vulgare".to_string(),
        description: "This plant has the typical daisy appearance with white petals and a \
                      yellow center. It grows to a height of 1 to 3 feet."
            .to_string(),
        removal_method: "Pull the plant out by the roots. This plant has a shallow root system, \
                         so you usually can pull out all of the roots. However, it spreads by \
                         rhizomes, so some of the rhizomes may snap when you pull the plant out \
                         of the ground. You may have more luck pulling out more roots when the \
                         soil is moist after a rain. When you pull the plant, make sure you put \
                         the entire plant in a yard waste bag and remove the bag from the \
                         premises."
            .to_string(),
        comments: "This is a perennial from Eurasia. It is highly invasive and is regulated as \
                   an invasive species in 13 states. Each flower can produce up to 200 seeds."
            .to_string(),
        location_desc: "Along the western edge of the ditch on the northern part of the \
                        property. Also, there are some isolated plants at the south end of the \
                        ditch."
            .to_string(),
        location_map: "images/OxeyeDaisy-20220313.png".to_string(),
        display_order,
        common_names: vec![
            NameSeed::primary("oxeye daisy"),
            NameSeed::alternate("ox-eye daisy"),
            NameSeed::alternate("dog daisy"),
            NameSeed::alternate("marguerite"),
            NameSeed::alternate("bull daisy"),
            NameSeed::alternate("button daisy"),
            NameSeed::alternate("field daisy"),
        ],
        photos: vec![
            PhotoSeed {
                url: "images/OxeyeDaisy-2.jpg".to_string(),
                caption: "Oxeye daisy stem has very small leaves".to_string(),
                display_order: 2,
            },
            PhotoSeed {
                url: "images/OxeyeDaisy-1.jpg".to_string(),
                caption: "The classic daisy look".to_string(),
                display_order: 1,
            },
        ],
    }
}
