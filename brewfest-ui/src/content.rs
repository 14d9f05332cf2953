//! Static festival copy shown on the marketing pages.

pub const FESTIVAL_NAME: &str = "Great Cambodian Craft Beer Festival 2026";
pub const EVENT_DATE: &str = "January 31, 2026";
pub const EVENT_HOURS: &str = "2:00 PM – 12:00 AM";
pub const EVENT_VENUE: &str = "Coconut Park Koh Pich, Phnom Penh";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Music,
    Award,
    Closing,
}

impl SlotKind {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Music => "🎵",
            Self::Award => "🏆",
            Self::Closing => "🕛",
        }
    }
}

pub struct ScheduleSlot {
    pub time: &'static str,
    pub title: &'static str,
    pub kind: SlotKind,
}

pub const SCHEDULE: &[ScheduleSlot] = &[
    ScheduleSlot { time: "2:00 PM", title: "DJ Cory - Event begins", kind: SlotKind::Music },
    ScheduleSlot { time: "2:45 PM to 3:30 PM", title: "Cambodia Sound Base - Live Performance", kind: SlotKind::Music },
    ScheduleSlot { time: "4:00 PM to 4:45 PM", title: "Zak Zoot - Live Performance", kind: SlotKind::Music },
    ScheduleSlot { time: "5:15 PM to 6:00 PM", title: "Ms Sarawan - Live Performance", kind: SlotKind::Music },
    ScheduleSlot { time: "6:30 PM to 7:30 PM", title: "Bustaka Band - Live Performance", kind: SlotKind::Music },
    ScheduleSlot { time: "8:00 PM to 9:00 PM", title: "Checkered Past / Brass - Live Performance", kind: SlotKind::Music },
    ScheduleSlot { time: "9:05 PM", title: "Yakima Chief Hops 'Festival's favorite' Award", kind: SlotKind::Award },
    ScheduleSlot { time: "9:30 PM to 10:30 PM", title: "Kampot Play Boys - Live Performance", kind: SlotKind::Music },
    ScheduleSlot { time: "10:30 PM", title: "DJ Cory continues", kind: SlotKind::Music },
    ScheduleSlot { time: "11:30 PM", title: "DJ Cory - Event ends", kind: SlotKind::Closing },
];

pub struct Sponsor {
    pub name: &'static str,
    pub role: &'static str,
}

pub const SPONSORS: &[Sponsor] = &[
    Sponsor { name: "BERTIE", role: "Official event partner." },
    Sponsor { name: "BOTANICO", role: "Premium beer supplier." },
    Sponsor { name: "CRAFT BEER ASSOCIATION", role: "Local food provider." },
    Sponsor { name: "THAI TAN", role: "Community supporter." },
    Sponsor { name: "YAKIMA CHIEF", role: "Craft beer enthusiast group." },
    Sponsor { name: "SKAI TECH", role: "Event logistics partner." },
];

pub struct Award {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub medals: &'static [&'static str],
    /// Decided by the on-site vote rather than a jury.
    pub guest_voted: bool,
}

pub const AWARDS: &[Award] = &[
    Award {
        title: "Main Award",
        subtitle: "Professional Judging",
        description: "Judged by a panel of six international experts using the BJCP score sheet in a blind tasting. Some of the judges are BJCP certified.",
        icon: "👑",
        medals: &["Gold", "Silver", "Bronze"],
        guest_voted: false,
    },
    Award {
        title: "People's Choice",
        subtitle: "Guest Voting",
        description: "Judged by you, our guests. Use the voting form on this site and submit one rating per brewery.",
        icon: "🙌",
        medals: &[],
        guest_voted: true,
    },
    Award {
        title: "Brewer's Choice",
        subtitle: "Peer Recognition",
        description: "Every participating brewer is at the festival, and they judge their fellow competitors' creations in a show of mutual respect.",
        icon: "🍺",
        medals: &[],
        guest_voted: false,
    },
];

/// Initials shown in place of a sponsor logo.
pub fn monogram(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .collect()
}
