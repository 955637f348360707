//! Lucide icons used by the portfolio
//!
//! Icons are a closed [`Icon`] enum. Content tables name icons by variant, so
//! a misspelt icon is a compile error; names coming from configuration are
//! checked once by [`FromStr`] and never at render time.

use crate::error::ContentError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// arrow down
const ARROW_DOWN: &str = r#"<path d="M12 5v14"/><path d="m19 12-7 7-7-7"/>"#;

/// arrow right
const ARROW_RIGHT: &str = r#"<path d="M5 12h14"/><path d="m12 5 7 7-7 7"/>"#;

/// arrow up
const ARROW_UP: &str = r#"<path d="m5 12 7-7 7 7"/><path d="M12 19V5"/>"#;

/// award
const AWARD: &str = r#"<path d="m15.477 12.89 1.515 8.526a.5.5 0 0 1-.81.47l-3.58-2.687a1 1 0 0 0-1.197 0l-3.586 2.686a.5.5 0 0 1-.81-.469l1.514-8.526"/><circle cx="12" cy="8" r="6"/>"#;

/// book open
const BOOK_OPEN: &str = r#"<path d="M12 7v14"/><path d="M3 18a1 1 0 0 1-1-1V4a1 1 0 0 1 1-1h5a4 4 0 0 1 4 4 4 4 0 0 1 4-4h5a1 1 0 0 1 1 1v13a1 1 0 0 1-1 1h-6a3 3 0 0 0-3 3 3 3 0 0 0-3-3z"/>"#;

/// brain
const BRAIN: &str = r#"<path d="M12 18V5"/><path d="M15 13a4.17 4.17 0 0 1-3-4 4.17 4.17 0 0 1-3 4"/><path d="M17.598 6.5A3 3 0 1 0 12 5a3 3 0 1 0-5.598 1.5"/><path d="M17.997 5.125a4 4 0 0 1 2.526 5.77"/><path d="M18 18a4 4 0 0 0 2-7.464"/><path d="M19.967 17.483A4 4 0 1 1 12 18a4 4 0 1 1-7.967-.517"/><path d="M6 18a4 4 0 0 1-2-7.464"/><path d="M6.003 5.125a4 4 0 0 0-2.526 5.77"/>"#;

/// briefcase
const BRIEFCASE: &str = r#"<path d="M16 20V4a2 2 0 0 0-2-2h-4a2 2 0 0 0-2 2v16"/><rect x="2" y="6" width="20" height="14" rx="2"/>"#;

/// calendar
const CALENDAR: &str = r#"<path d="M8 2v4"/><path d="M16 2v4"/><rect x="3" y="4" width="18" height="18" rx="2"/><path d="M3 10h18"/>"#;

/// code
const CODE: &str = r#"<path d="m16 18 6-6-6-6"/><path d="m8 6-6 6 6 6"/>"#;

/// coffee
const COFFEE: &str = r#"<path d="M10 2v2"/><path d="M14 2v2"/><path d="M16 8a1 1 0 0 1 1 1v8a4 4 0 0 1-4 4H7a4 4 0 0 1-4-4V9a1 1 0 0 1 1-1h14a4 4 0 1 1 0 8h-1"/><path d="M6 2v2"/>"#;

/// download
const DOWNLOAD: &str = r#"<path d="M12 15V3"/><path d="M21 15v4a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2v-4"/><path d="m7 10 5 5 5-5"/>"#;

/// external link
const EXTERNAL_LINK: &str = r#"<path d="M15 3h6v6"/><path d="M10 14 21 3"/><path d="M18 13v6a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V8a2 2 0 0 1 2-2h6"/>"#;

/// github
const GITHUB: &str = r#"<path d="M15 22v-4a4.8 4.8 0 0 0-1-3.5c3 0 6-2 6-5.5.08-1.25-.27-2.48-1-3.5.28-1.15.28-2.35 0-3.5 0 0-1 0-3 1.5-2.64-.5-5.36-.5-8 0C6 2 5 2 5 2c-.3 1.15-.3 2.35 0 3.5A5.403 5.403 0 0 0 4 9c0 3.5 3 5.5 6 5.5-.39.49-.68 1.05-.85 1.65-.17.6-.22 1.23-.15 1.85v4"/><path d="M9 18c-4.51 2-5-2-7-2"/>"#;

/// graduation cap
const GRADUATION_CAP: &str = r#"<path d="M21.42 10.922a1 1 0 0 0-.019-1.838L12.83 5.18a2 2 0 0 0-1.66 0L2.6 9.08a1 1 0 0 0 0 1.832l8.57 3.908a2 2 0 0 0 1.66 0z"/><path d="M22 10v6"/><path d="M6 12.5V16a6 3 0 0 0 12 0v-3.5"/>"#;

/// heart
const HEART: &str = r#"<path d="M2 9.5a5.5 5.5 0 0 1 9.591-3.676.56.56 0 0 0 .818 0A5.49 5.49 0 0 1 22 9.5c0 2.29-1.5 4-3 5.5l-5.492 5.313a2 2 0 0 1-3 .019L5 15c-1.5-1.5-3-3.2-3-5.5"/>"#;

/// house
const HOUSE: &str = r#"<path d="M15 21v-8a1 1 0 0 0-1-1h-4a1 1 0 0 0-1 1v8"/><path d="M3 10a2 2 0 0 1 .709-1.528l7-6a2 2 0 0 1 2.582 0l7 6A2 2 0 0 1 21 10v9a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2z"/>"#;

/// linkedin
const LINKEDIN: &str = r#"<path d="M16 8a6 6 0 0 1 6 6v7h-4v-7a2 2 0 0 0-2-2 2 2 0 0 0-2 2v7h-4v-7a6 6 0 0 1 6-6z"/><rect x="2" y="9" width="4" height="12"/><circle cx="4" cy="4" r="2"/>"#;

/// mail
const MAIL: &str = r#"<path d="m22 7-8.991 5.727a2 2 0 0 1-2.009 0L2 7"/><rect x="2" y="4" width="20" height="16" rx="2"/>"#;

/// map pin
const MAP_PIN: &str = r#"<path d="M20 10c0 4.993-5.539 10.193-7.399 11.799a1 1 0 0 1-1.202 0C9.539 20.193 4 14.993 4 10a8 8 0 0 1 16 0"/><circle cx="12" cy="10" r="3"/>"#;

/// menu
const MENU: &str = r#"<path d="M4 5h16"/><path d="M4 12h16"/><path d="M4 19h16"/>"#;

/// message circle
const MESSAGE_CIRCLE: &str = r#"<path d="M2.992 16.342a2 2 0 0 1 .094 1.167l-1.065 3.29a1 1 0 0 0 1.236 1.168l3.413-.998a2 2 0 0 1 1.099.092 10 10 0 1 0-4.777-4.719"/>"#;

/// moon
const MOON: &str = r#"<path d="M20.985 12.486a9 9 0 1 1-9.473-9.472c.405-.022.617.46.402.803a6 6 0 0 0 8.268 8.268c.344-.215.825-.004.803.401"/>"#;

/// palette
const PALETTE: &str = r#"<path d="M12 22a1 1 0 0 1 0-20 10 9 0 0 1 10 9 5 5 0 0 1-5 5h-2.25a1.75 1.75 0 0 0-1.4 2.8l.3.4a1.75 1.75 0 0 1-1.4 2.8z"/><circle cx="13.5" cy="6.5" r=".5"/><circle cx="17.5" cy="10.5" r=".5"/><circle cx="6.5" cy="12.5" r=".5"/><circle cx="8.5" cy="7.5" r=".5"/>"#;

/// phone
const PHONE: &str = r#"<path d="M13.832 16.568a1 1 0 0 0 1.213-.303l.355-.465A2 2 0 0 1 17 15h3a2 2 0 0 1 2 2v3a2 2 0 0 1-2 2A18 18 0 0 1 2 4a2 2 0 0 1 2-2h3a2 2 0 0 1 2 2v3a2 2 0 0 1-.8 1.6l-.468.351a1 1 0 0 0-.292 1.233 14 14 0 0 0 6.392 6.384"/>"#;

/// send
const SEND: &str = r#"<path d="M14.536 21.686a.5.5 0 0 0 .937-.024l6.5-19a.496.496 0 0 0-.635-.635l-19 6.5a.5.5 0 0 0-.024.937l7.93 3.18a2 2 0 0 1 1.112 1.11z"/><path d="m21.854 2.147-10.94 10.939"/>"#;

/// sparkles
const SPARKLES: &str = r#"<path d="M11.017 2.814a1 1 0 0 1 1.966 0l1.051 5.558a2 2 0 0 0 1.594 1.594l5.558 1.051a1 1 0 0 1 0 1.966l-5.558 1.051a2 2 0 0 0-1.594 1.594l-1.051 5.558a1 1 0 0 1-1.966 0l-1.051-5.558a2 2 0 0 0-1.594-1.594l-5.558-1.051a1 1 0 0 1 0-1.966l5.558-1.051a2 2 0 0 0 1.594-1.594z"/><path d="M20 2v4"/><path d="M22 4h-4"/><circle cx="4" cy="20" r="2"/>"#;

/// star
const STAR: &str = r#"<path d="M11.525 2.295a.53.53 0 0 1 .95 0l2.31 4.679a2.123 2.123 0 0 0 1.595 1.16l5.166.756a.53.53 0 0 1 .294.904l-3.736 3.638a2.123 2.123 0 0 0-.611 1.878l.882 5.14a.53.53 0 0 1-.771.56l-4.618-2.428a2.122 2.122 0 0 0-1.973 0L6.396 21.01a.53.53 0 0 1-.77-.56l.881-5.139a2.122 2.122 0 0 0-.611-1.879L2.16 9.795a.53.53 0 0 1 .294-.906l5.165-.755a2.122 2.122 0 0 0 1.597-1.16z"/>"#;

/// sun
const SUN: &str = r#"<circle cx="12" cy="12" r="4"/><path d="M12 2v2"/><path d="M12 20v2"/><path d="m4.93 4.93 1.41 1.41"/><path d="m17.66 17.66 1.41 1.41"/><path d="M2 12h2"/><path d="M20 12h2"/><path d="m6.34 17.66-1.41 1.41"/><path d="m19.07 4.93-1.41 1.41"/>"#;

/// trophy
const TROPHY: &str = r#"<path d="M10 14.66v1.626a2 2 0 0 1-.976 1.696A5 5 0 0 0 7 21.978"/><path d="M14 14.66v1.626a2 2 0 0 0 .976 1.696A5 5 0 0 1 17 21.978"/><path d="M18 9h1.5a1 1 0 0 0 0-5H18"/><path d="M4 22h16"/><path d="M6 9a6 6 0 0 0 12 0V3a1 1 0 0 0-1-1H7a1 1 0 0 0-1 1z"/><path d="M6 9H4.5a1 1 0 0 1 0-5H6"/>"#;

/// twitter
const TWITTER: &str = r#"<path d="M22 4s-.7 2.1-2 3.4c1.6 10-9.4 17.3-18 11.6 2.2.1 4.4-.6 6-2C3 15.5.5 9.6 3 5c2.2 2.6 5.6 4.1 9 4-.9-4.2 4-6.6 7-3.8 1.1 0 3-1.2 3-1.2z"/>"#;

/// user
const USER: &str = r#"<path d="M19 21v-2a4 4 0 0 0-4-4H9a4 4 0 0 0-4 4v2"/><circle cx="12" cy="7" r="4"/>"#;

/// users
const USERS: &str = r#"<path d="M16 21v-2a4 4 0 0 0-4-4H6a4 4 0 0 0-4 4v2"/><path d="M16 3.128a4 4 0 0 1 0 7.744"/><path d="M22 21v-2a4 4 0 0 0-3-3.87"/><circle cx="9" cy="7" r="4"/>"#;

/// x
const X: &str = r#"<path d="M18 6 6 18"/><path d="m6 6 12 12"/>"#;

/// zap
const ZAP: &str = r#"<path d="M4 14a1 1 0 0 1-.78-1.63l9.9-10.2a.5.5 0 0 1 .86.46l-1.92 6.02A1 1 0 0 0 13 10h7a1 1 0 0 1 .78 1.63l-9.9 10.2a.5.5 0 0 1-.86-.46l1.92-6.02A1 1 0 0 0 11 14z"/>"#;

/// Icon set of the site
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Icon {
    ArrowDown,
    ArrowRight,
    ArrowUp,
    Award,
    BookOpen,
    Brain,
    Briefcase,
    Calendar,
    Code,
    Coffee,
    Download,
    ExternalLink,
    Github,
    GraduationCap,
    Heart,
    Home,
    Linkedin,
    Mail,
    MapPin,
    Menu,
    MessageCircle,
    Moon,
    Palette,
    Phone,
    Send,
    Sparkles,
    Star,
    Sun,
    Trophy,
    Twitter,
    User,
    Users,
    X,
    Zap,
}

impl Icon {
    pub const ALL: [Icon; 34] = [
        Icon::ArrowDown,
        Icon::ArrowRight,
        Icon::ArrowUp,
        Icon::Award,
        Icon::BookOpen,
        Icon::Brain,
        Icon::Briefcase,
        Icon::Calendar,
        Icon::Code,
        Icon::Coffee,
        Icon::Download,
        Icon::ExternalLink,
        Icon::Github,
        Icon::GraduationCap,
        Icon::Heart,
        Icon::Home,
        Icon::Linkedin,
        Icon::Mail,
        Icon::MapPin,
        Icon::Menu,
        Icon::MessageCircle,
        Icon::Moon,
        Icon::Palette,
        Icon::Phone,
        Icon::Send,
        Icon::Sparkles,
        Icon::Star,
        Icon::Sun,
        Icon::Trophy,
        Icon::Twitter,
        Icon::User,
        Icon::Users,
        Icon::X,
        Icon::Zap,
    ];

    /// Component name, as written in content tables (`"GraduationCap"`)
    pub fn name(&self) -> &'static str {
        match self {
            Icon::ArrowDown => "ArrowDown",
            Icon::ArrowRight => "ArrowRight",
            Icon::ArrowUp => "ArrowUp",
            Icon::Award => "Award",
            Icon::BookOpen => "BookOpen",
            Icon::Brain => "Brain",
            Icon::Briefcase => "Briefcase",
            Icon::Calendar => "Calendar",
            Icon::Code => "Code",
            Icon::Coffee => "Coffee",
            Icon::Download => "Download",
            Icon::ExternalLink => "ExternalLink",
            Icon::Github => "Github",
            Icon::GraduationCap => "GraduationCap",
            Icon::Heart => "Heart",
            Icon::Home => "Home",
            Icon::Linkedin => "Linkedin",
            Icon::Mail => "Mail",
            Icon::MapPin => "MapPin",
            Icon::Menu => "Menu",
            Icon::MessageCircle => "MessageCircle",
            Icon::Moon => "Moon",
            Icon::Palette => "Palette",
            Icon::Phone => "Phone",
            Icon::Send => "Send",
            Icon::Sparkles => "Sparkles",
            Icon::Star => "Star",
            Icon::Sun => "Sun",
            Icon::Trophy => "Trophy",
            Icon::Twitter => "Twitter",
            Icon::User => "User",
            Icon::Users => "Users",
            Icon::X => "X",
            Icon::Zap => "Zap",
        }
    }

    /// Lucide file name (`"graduation-cap"`)
    pub fn lucide_name(&self) -> &'static str {
        match self {
            Icon::ArrowDown => "arrow-down",
            Icon::ArrowRight => "arrow-right",
            Icon::ArrowUp => "arrow-up",
            Icon::Award => "award",
            Icon::BookOpen => "book-open",
            Icon::Brain => "brain",
            Icon::Briefcase => "briefcase",
            Icon::Calendar => "calendar",
            Icon::Code => "code",
            Icon::Coffee => "coffee",
            Icon::Download => "download",
            Icon::ExternalLink => "external-link",
            Icon::Github => "github",
            Icon::GraduationCap => "graduation-cap",
            Icon::Heart => "heart",
            Icon::Home => "house",
            Icon::Linkedin => "linkedin",
            Icon::Mail => "mail",
            Icon::MapPin => "map-pin",
            Icon::Menu => "menu",
            Icon::MessageCircle => "message-circle",
            Icon::Moon => "moon",
            Icon::Palette => "palette",
            Icon::Phone => "phone",
            Icon::Send => "send",
            Icon::Sparkles => "sparkles",
            Icon::Star => "star",
            Icon::Sun => "sun",
            Icon::Trophy => "trophy",
            Icon::Twitter => "twitter",
            Icon::User => "user",
            Icon::Users => "users",
            Icon::X => "x",
            Icon::Zap => "zap",
        }
    }

    /// SVG inner elements
    pub fn svg(&self) -> &'static str {
        match self {
            Icon::ArrowDown => ARROW_DOWN,
            Icon::ArrowRight => ARROW_RIGHT,
            Icon::ArrowUp => ARROW_UP,
            Icon::Award => AWARD,
            Icon::BookOpen => BOOK_OPEN,
            Icon::Brain => BRAIN,
            Icon::Briefcase => BRIEFCASE,
            Icon::Calendar => CALENDAR,
            Icon::Code => CODE,
            Icon::Coffee => COFFEE,
            Icon::Download => DOWNLOAD,
            Icon::ExternalLink => EXTERNAL_LINK,
            Icon::Github => GITHUB,
            Icon::GraduationCap => GRADUATION_CAP,
            Icon::Heart => HEART,
            Icon::Home => HOUSE,
            Icon::Linkedin => LINKEDIN,
            Icon::Mail => MAIL,
            Icon::MapPin => MAP_PIN,
            Icon::Menu => MENU,
            Icon::MessageCircle => MESSAGE_CIRCLE,
            Icon::Moon => MOON,
            Icon::Palette => PALETTE,
            Icon::Phone => PHONE,
            Icon::Send => SEND,
            Icon::Sparkles => SPARKLES,
            Icon::Star => STAR,
            Icon::Sun => SUN,
            Icon::Trophy => TROPHY,
            Icon::Twitter => TWITTER,
            Icon::User => USER,
            Icon::Users => USERS,
            Icon::X => X,
            Icon::Zap => ZAP,
        }
    }
}

/// Wrap an icon in a complete 24x24-viewBox SVG element
pub fn to_svg(icon: Icon, size: f32) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">{}</svg>"#,
        icon.svg()
    )
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Icon {
    type Err = ContentError;

    /// Accepts component names and Lucide file names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Icon::ALL
            .into_iter()
            .find(|icon| icon.name() == s || icon.lucide_name() == s)
            .ok_or_else(|| ContentError::UnknownIcon(s.to_string()))
    }
}

impl Serialize for Icon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Icon {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
