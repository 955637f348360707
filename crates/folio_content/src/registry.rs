//! Static content tables
//!
//! Everything the page shows is fixed at compile time. Tables are
//! `&'static` slices of plain structs; the navigation table also defines the
//! section order the scroll runtime tracks.

use crate::icons::Icon;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct PersonalInfo {
    pub name: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub location: &'static str,
    pub coordinates: Coordinates,
    pub phone: &'static str,
    pub email: &'static str,
    pub resume_link: &'static str,
    pub hero_greeting: &'static str,
    pub hero_description: &'static str,
    pub about_title: &'static str,
    pub about_description: &'static [&'static str],
    pub response_time: &'static str,
}

/// One navigable section
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: Icon,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct SocialLink {
    pub name: &'static str,
    pub url: &'static str,
    pub icon: Icon,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Skill {
    pub name: &'static str,
    /// Self-assessed, 0-100
    pub level: u8,
    pub logo: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct SkillGroup {
    pub title: &'static str,
    pub skills: &'static [Skill],
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct AboutFeature {
    pub title: &'static str,
    pub icon: Icon,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct EducationEntry {
    pub id: &'static str,
    pub institution: &'static str,
    pub degree: &'static str,
    pub field: &'static str,
    pub start: &'static str,
    /// `None` for single-date entries
    pub end: Option<&'static str>,
    pub description: &'static str,
    pub achievements: &'static [&'static str],
    pub location: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Completed,
    InProgress,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Project {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub long_description: &'static str,
    pub image: &'static str,
    pub technologies: &'static [&'static str],
    pub github: &'static str,
    pub live: Option<&'static str>,
    pub featured: bool,
    pub category: &'static str,
    pub status: ProjectStatus,
    pub year: u16,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct ContactChannel {
    pub icon: Icon,
    pub title: &'static str,
    pub content: &'static str,
    pub href: Option<&'static str>,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct ContactFormCopy {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub submit_text: &'static str,
    pub success_message: &'static str,
    pub error_message: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Certification {
    pub id: &'static str,
    pub name: &'static str,
    pub issuer: &'static str,
    pub date: &'static str,
    pub credential_id: &'static str,
    pub url: &'static str,
    pub description: &'static str,
}

/// Site-wide animation defaults
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AnimationDefaults {
    pub page_load_delay_seconds: f32,
    pub stagger_seconds: f32,
    /// Reveal trigger line, as a fraction of the viewport height measured
    /// up from the bottom (`top 80%` is 0.2)
    pub trigger_start: f32,
    pub trigger_end: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FeatureFlags {
    pub smooth_scroll: bool,
    pub particle_background: bool,
    pub scroll_progress: bool,
    pub dark_mode: bool,
    pub google_maps: bool,
    pub blog: bool,
    pub testimonials: bool,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct SiteConfig {
    pub site_name: &'static str,
    pub site_description: &'static str,
    pub site_url: &'static str,
    pub author: &'static str,
    pub animation: AnimationDefaults,
    pub features: FeatureFlags,
}

// ============================================================================
// Tables
// ============================================================================

pub static PERSONAL_INFO: PersonalInfo = PersonalInfo {
    name: "Kebin Malla",
    title: "Full-Stack Developer",
    subtitle: "Full-Stack Developer",
    location: "Kathmandu, Nepal",
    coordinates: Coordinates {
        lat: 27.6904,
        lng: 85.3325,
    },
    phone: "+977 9862394960",
    email: "mallakebin@gmail.com",
    resume_link: "https://drive.google.com/file/d/1q--KNIMRF6njAYOLiQ0qrEcprvDt2n9c/view?usp=drive_link",
    hero_greeting: "Hello, I'm",
    hero_description: "I create digital experiences that make you go 'Wow! this is some pretty cool stuff'",
    about_title: "About Me",
    about_description: &[
        "I'm a MERN stack developer passionate about building robust, scalable web applications using MongoDB, Express.js, React, and Node.js. My journey began with hands-on projects, quickly evolving into a deep commitment to mastering full-stack development.",
        "I focus on crafting seamless user experiences and efficient backend systems, leveraging tools like Redux, REST APIs, and modern deployment workflows. My work blends clean code, performance optimization, and intuitive design.",
        "Outside of coding, I enjoy gaming, cooking and travelling with a touch of mentoring",
    ],
    response_time: "Within 24 hours",
};

pub static SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        name: "GitHub",
        url: "https://github.com/kevin272",
        icon: Icon::Github,
    },
    SocialLink {
        name: "LinkedIn",
        url: "https://linkedin.com/in/kebinmalla",
        icon: Icon::Linkedin,
    },
    SocialLink {
        name: "Email",
        url: "mailto:mallakebin@gmail.com",
        icon: Icon::Mail,
    },
    SocialLink {
        name: "Twitter",
        url: "https://twitter.com/DevilKevin2",
        icon: Icon::Twitter,
    },
];

/// Navigation order is document order
pub static NAV_ITEMS: &[NavItem] = &[
    NavItem {
        id: "home",
        label: "Home",
        icon: Icon::Home,
    },
    NavItem {
        id: "about",
        label: "About",
        icon: Icon::User,
    },
    NavItem {
        id: "skills",
        label: "Skills",
        icon: Icon::Code,
    },
    NavItem {
        id: "education",
        label: "Education",
        icon: Icon::GraduationCap,
    },
    NavItem {
        id: "projects",
        label: "Projects",
        icon: Icon::Briefcase,
    },
    NavItem {
        id: "contact",
        label: "Contact",
        icon: Icon::Mail,
    },
];

pub static TECH_STACK: &[&str] = &[
    "HTML5",
    "CSS3",
    "JavaScript",
    "React",
    "TypeScript",
    "Node.js",
    "Python",
    "Docker",
    "PostgreSQL",
    "MongoDB",
    "C",
];

macro_rules! skill {
    ($name:expr, $level:expr, $logo:literal) => {
        Skill {
            name: $name,
            level: $level,
            logo: concat!("https://cdn.jsdelivr.net/gh/devicons/devicon/icons/", $logo),
        }
    };
}

pub static SKILL_GROUPS: &[SkillGroup] = &[
    SkillGroup {
        title: "Frontend Technologies",
        skills: &[
            skill!("React", 95, "react/react-original.svg"),
            skill!("TypeScript", 90, "typescript/typescript-original.svg"),
            skill!("Tailwind CSS", 85, "tailwindcss/tailwindcss-plain.svg"),
            skill!("JavaScript", 92, "javascript/javascript-original.svg"),
            skill!("HTML5", 95, "html5/html5-original.svg"),
        ],
    },
    SkillGroup {
        title: "Backend & Database",
        skills: &[
            skill!("Node.js", 88, "nodejs/nodejs-original.svg"),
            skill!("Python", 85, "python/python-original.svg"),
            skill!("MongoDB", 80, "mongodb/mongodb-original.svg"),
            skill!("Express.js", 90, "express/express-original.svg"),
        ],
    },
    SkillGroup {
        title: "Tools & Cloud",
        skills: &[
            skill!("Git", 90, "git/git-original.svg"),
            skill!("Docker", 78, "docker/docker-original.svg"),
            skill!("Figma", 85, "figma/figma-original.svg"),
            skill!("VS Code", 95, "vscode/vscode-original.svg"),
            skill!("Linux", 85, "linux/linux-original.svg"),
        ],
    },
];

pub static ABOUT_FEATURES: &[AboutFeature] = &[
    AboutFeature {
        title: "Clean Code",
        icon: Icon::Code,
    },
    AboutFeature {
        title: "Beautiful Design",
        icon: Icon::Palette,
    },
    AboutFeature {
        title: "Performance",
        icon: Icon::Zap,
    },
    AboutFeature {
        title: "Passion",
        icon: Icon::Heart,
    },
];

pub static EDUCATION: &[EducationEntry] = &[
    EducationEntry {
        id: "university-cs",
        institution: "Kantipur Engineering College, Tribhuvan University",
        degree: "Bachelors of Engineering",
        field: "Computer Science",
        start: "2020",
        end: Some("Present"),
        description: "Pursuing a Bachelor of Engineering in Computer Science with a focus on software development, data structures, algorithms, and web technologies. Engaged in various projects and research activities to enhance practical skills.",
        achievements: &[],
        location: "Dhapakhel, Lalitpur",
    },
    EducationEntry {
        id: "bootcamp-fullstack",
        institution: "Broadway Infosys",
        degree: "Certificate",
        field: "Full-Stack Web Development",
        start: "2025",
        end: None,
        description: "Successfully finished a 135-hour training course focused on full stack development using the MERN stack, culminating in the completion of a project.",
        achievements: &[
            "Built a full-stack applications deployed to production",
            "Led solo project resulting in polished e-commerce platform",
            "Completed 150+ hours of coding and project work",
        ],
        location: "Shantinagar, Kathmandu",
    },
];

pub static PROJECTS: &[Project] = &[
    Project {
        id: "donation-platform",
        title: "SajhaBiz",
        description: "A full-featured donation platform built with React, Node.js, and PostgreSQL. Features include user authentication, Guestchat with admin, and admin dashboard.",
        long_description: "A full stack donation platform enables users to support local business campaigns, featuring JWT-based authentication, Google Maps API integration, and a CRUD-powered admin panel for managing users and campaigns. It leverages Redux for seamless user auth and donation state handling, with additional features like donation tracking, personalized dashboards, and real-time chat.",
        image: "./Sajhabiz.png",
        technologies: &[
            "React",
            "Node.js",
            "MongoDB",
            "Tailwind CSS",
            "Express",
            "Socket.io",
            "JWT",
            "Google Maps API",
        ],
        github: "https://github.com/kevin272/MERN/tree/main/API",
        live: None,
        featured: true,
        category: "web",
        status: ProjectStatus::Completed,
        year: 2025,
    },
    Project {
        id: "chat-app",
        title: "ChatR",
        description: "A real-time chat application with group chats, direct messaging, and media sharing capabilities with video calling.",
        long_description: "Real-time chat with typing indicators, reactions, threads with video calls, screen sharing and recording support via Stream",
        image: "./ChatR.png",
        technologies: &["React", "Stream.IO", "Express", "MongoDB", "TailwindCSS", "DaisyUI"],
        github: "https://github.com/kevin272/ChatR",
        live: Some("https://chatr.kebinmalla.com.np"),
        featured: true,
        category: "web",
        status: ProjectStatus::Completed,
        year: 2025,
    },
    Project {
        id: "noteify",
        title: "Noteify",
        description: "Simple Note taking app utilizing CRUD.",
        long_description: "Simple Note taking app utilizing CRUD.",
        image: "./Noteify.png",
        technologies: &["MERN STACK"],
        github: "https://github.com/kevin272/noteify",
        live: Some("https://noteify.kebinmalla.com.np"),
        featured: true,
        category: "web",
        status: ProjectStatus::InProgress,
        year: 2025,
    },
    Project {
        id: "portfolio",
        title: "Portfolio with template",
        description: "Current site you are viewing, built with React, TypeScript, and Tailwind CSS.",
        long_description: "",
        image: "https://i.imgur.com/dVo15Vx.png",
        technologies: &["React", "TypeScript", "Tailwind CSS", "Vite"],
        github: "https://github.com/kevin272/Portfolio",
        live: Some("https://kebinmalla.com.np/Portfolio"),
        featured: true,
        category: "web",
        status: ProjectStatus::InProgress,
        year: 2025,
    },
];

pub static CONTACT_CHANNELS: &[ContactChannel] = &[
    ContactChannel {
        icon: Icon::MapPin,
        title: "Location",
        content: "Kathmandu, Nepal",
        href: None,
    },
    ContactChannel {
        icon: Icon::Phone,
        title: "Phone",
        content: "+977 9862394960",
        href: Some("tel:+9779862394960"),
    },
    ContactChannel {
        icon: Icon::Mail,
        title: "Email",
        content: "mallakebin@gmail.com",
        href: Some("mailto:mallakebin@gmail.com"),
    },
    ContactChannel {
        icon: Icon::MessageCircle,
        title: "Response Time",
        content: "Within 24 hours",
        href: None,
    },
];

pub static CONTACT_FORM: ContactFormCopy = ContactFormCopy {
    title: "Let's Start a Conversation",
    subtitle: "I'm always interested in hearing about new projects and opportunities. Whether you're a company looking to hire, or you're someone with an idea you'd like to discuss, I'd love to hear from you.",
    submit_text: "Send Message",
    success_message: "Thank you for your message! I'll get back to you soon.",
    error_message: "Sorry, there was an error sending your message. Please try again.",
};

pub static CERTIFICATIONS: &[Certification] = &[
    Certification {
        id: "aws-solutions-architect",
        name: "AWS Certified Solutions Architect",
        issuer: "Amazon Web Services",
        date: "2023",
        credential_id: "AWS-SA-2023-001",
        url: "https://aws.amazon.com/certification/",
        description: "Validates expertise in designing distributed systems on AWS",
    },
    Certification {
        id: "react-advanced",
        name: "Advanced React Development",
        issuer: "Meta",
        date: "2023",
        credential_id: "META-REACT-2023",
        url: "https://developers.facebook.com/certification/",
        description: "Advanced concepts in React including performance optimization and testing",
    },
    Certification {
        id: "google-cloud-dev",
        name: "Google Cloud Professional Developer",
        issuer: "Google Cloud",
        date: "2022",
        credential_id: "GCP-DEV-2022-789",
        url: "https://cloud.google.com/certification/",
        description: "Demonstrates ability to build scalable applications on Google Cloud Platform",
    },
];

pub static SITE_CONFIG: SiteConfig = SiteConfig {
    site_name: "Kebin Malla - Portfolio",
    site_description: "Full-Stack Developer specializing in React, Node.js, and modern web technologies.",
    site_url: "https://www.kebinmalla.com.np",
    author: "Kebin Malla",
    animation: AnimationDefaults {
        page_load_delay_seconds: 0.8,
        stagger_seconds: 0.1,
        trigger_start: 0.2,
        trigger_end: 0.3,
    },
    features: FeatureFlags {
        smooth_scroll: true,
        particle_background: false,
        scroll_progress: true,
        dark_mode: true,
        google_maps: false,
        blog: false,
        testimonials: false,
    },
};

// ============================================================================
// Lookups
// ============================================================================

/// Section ids in document order
pub fn section_ids() -> impl Iterator<Item = &'static str> {
    NAV_ITEMS.iter().map(|item| item.id)
}

pub fn nav_item(id: &str) -> Option<&'static NavItem> {
    NAV_ITEMS.iter().find(|item| item.id == id)
}

pub fn project(id: &str) -> Option<&'static Project> {
    PROJECTS.iter().find(|project| project.id == id)
}

/// Every skill, in table order
pub fn all_skills() -> impl Iterator<Item = &'static Skill> {
    SKILL_GROUPS.iter().flat_map(|group| group.skills.iter())
}
