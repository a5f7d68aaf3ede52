//! Static page copy and image assets

/// Anchor of a page section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Home,
    About,
    Services,
    Approach,
    Contact,
}

/// A deferred image: `source` is only resolved once the image nears the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageAsset {
    pub source: &'static str,
    pub alt: &'static str,
    pub height: u16,
}

#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub id: SectionId,
    pub title: &'static str,
    pub paragraphs: &'static [&'static str],
    pub image: Option<ImageAsset>,
}

pub const BRAND: &str = "JT Trauma Therapy";
pub const TAGLINE: &str = "Compassionate, evidence-based care for healing and growth";

pub const SECTIONS: &[Section] = &[
    Section {
        id: SectionId::Home,
        title: "Healing starts with feeling safe",
        paragraphs: &[
            TAGLINE,
            "Trauma-informed therapy for adults and young people from 16, in person and online.",
        ],
        image: Some(ImageAsset {
            source: "images/horizon.txt",
            alt: "A calm horizon at sunrise",
            height: 6,
        }),
    },
    Section {
        id: SectionId::About,
        title: "About",
        paragraphs: &[
            "I am an accredited psychotherapist specialising in trauma, anxiety and the long shadow of difficult experiences.",
            "Sessions move at your pace. Nothing is expected of you before you are ready, and you stay in control of what we talk about.",
        ],
        image: Some(ImageAsset {
            source: "images/lotus.txt",
            alt: "A lotus flower",
            height: 7,
        }),
    },
    Section {
        id: SectionId::Services,
        title: "Services",
        paragraphs: &[
            "Initial Consultation - a free 20 minute call to see whether we are a good fit.",
            "Individual Therapy - weekly 50 minute sessions tailored to you.",
            "EMDR - 80 minute sessions using Eye Movement Desensitisation and Reprocessing.",
            "Online Sessions - secure video sessions wherever you are.",
        ],
        image: None,
    },
    Section {
        id: SectionId::Approach,
        title: "My Approach",
        paragraphs: &[
            "Safety first: we build stability and coping skills before any trauma processing.",
            "Collaborative: we agree goals together and review them regularly.",
            "Integrative: EMDR, somatic work and compassion-focused therapy, chosen for what helps you.",
        ],
        image: Some(ImageAsset {
            source: "images/path.txt",
            alt: "A winding path through trees",
            height: 6,
        }),
    },
    Section {
        id: SectionId::Contact,
        title: "Contact",
        paragraphs: &[
            "Email: hello@jttraumatherapy.com",
            "Sessions Monday to Friday, 9am - 7pm. I aim to reply within two working days.",
            "If you are in crisis, please contact your local emergency services.",
        ],
        image: None,
    },
];

const HORIZON: &[&str] = &[
    r"             \  |  /             ",
    r"           '-.;;;.-'             ",
    r"          -==;;;;;==-            ",
    r"  ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~  ",
    r"     ~~~~~~~~~~~~~~~~~~~~~~~     ",
    r"         ~~~~~~~~~~~~~~~         ",
];

const LOTUS: &[&str] = &[
    r"              .               ",
    r"             / \              ",
    r"        .   /   \   .         ",
    r"       / \_/  |  \_/ \        ",
    r"      (   \   |   /   )       ",
    r"       '-._'--+--'_.-'        ",
    r"           '~~~~~'            ",
];

const PATH: &[&str] = &[
    r"    ^    ^^        ^   ^^     ",
    r"   ^^^  ^^^^  ..  ^^^ ^^^^    ",
    r"    |    ||  :  :  |   ||     ",
    r"          .:    :.            ",
    r"        .:        :.          ",
    r"      .:            :.        ",
];

/// Resolve an image source to its art
pub fn resolve_image(source: &str) -> Option<&'static [&'static str]> {
    match source {
        "images/horizon.txt" => Some(HORIZON),
        "images/lotus.txt" => Some(LOTUS),
        "images/path.txt" => Some(PATH),
        _ => None,
    }
}
