//! Icon and color lookup tables.
//!
//! A [`Theme`] maps categories, edge kinds and free-form technology names to
//! colors and icons. It is part of [`StyleConfig`](crate::config::StyleConfig),
//! so every table can be overridden from the configuration file. Entries of
//! the color and icon maps given in a configuration are merged over the
//! defaults; the ordered icon rule lists replace the defaults wholesale.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use stackmap_core::{
    color::Color,
    semantic::{Category, EdgeKind, Node},
};

/// A substring rule mapping a name to a short icon code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IconRule {
    pattern: String,
    icon: String,
}

impl IconRule {
    pub fn new(pattern: &str, icon: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            icon: icon.to_string(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }
}

/// Lookup tables for colors and icons.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Theme {
    #[serde(deserialize_with = "merge_category_colors")]
    category_colors: IndexMap<String, Color>,
    #[serde(deserialize_with = "merge_category_icons")]
    category_icons: IndexMap<String, String>,
    #[serde(deserialize_with = "merge_edge_colors")]
    edge_colors: IndexMap<String, Color>,

    /// Matched case-insensitively, evaluated first.
    provider_rules: Vec<IconRule>,
    /// Matched case-sensitively, evaluated second.
    technology_rules: Vec<IconRule>,
    /// Matched case-sensitively, evaluated last.
    keyword_rules: Vec<IconRule>,

    fallback_color: Color,
    fallback_icon: String,
    fallback_icon_code: String,
    fallback_edge_color: Color,

    flow_color: Color,
    badge_color: Color,
}

impl Theme {
    /// Color of a category, or the fallback gray.
    pub fn category_color(&self, category: &Category) -> Color {
        self.category_colors
            .get(category.name())
            .copied()
            .unwrap_or(self.fallback_color)
    }

    /// Icon of a category, or the fallback gear.
    pub fn category_icon(&self, category: &Category) -> &str {
        self.category_icons
            .get(category.name())
            .map_or(self.fallback_icon.as_str(), String::as_str)
    }

    /// Connector color of an edge kind.
    pub fn edge_color(&self, kind: &EdgeKind) -> Color {
        self.edge_colors
            .get(kind.name())
            .copied()
            .unwrap_or(self.fallback_edge_color)
    }

    /// Explicit node color, else its category color.
    pub fn node_color(&self, node: &Node) -> Color {
        node.color()
            .unwrap_or_else(|| self.category_color(node.category()))
    }

    /// Explicit node icon, else its category icon.
    pub fn node_icon<'a>(&'a self, node: &'a Node) -> &'a str {
        node.icon()
            .unwrap_or_else(|| self.category_icon(node.category()))
    }

    /// Resolves a short icon code for a technology or service name.
    ///
    /// Provider rules are tried first against the upper-cased name, then
    /// technology rules, then keyword rules. The first match wins; without
    /// a match the fallback code is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// # use stackmap::theme::Theme;
    /// let theme = Theme::default();
    /// assert_eq!(theme.icon_for("Amazon S3 bucket"), "S3");
    /// assert_eq!(theme.icon_for("Rust"), "RS");
    /// assert_eq!(theme.icon_for("User Database"), "DB");
    /// assert_eq!(theme.icon_for("cron"), "SYS");
    /// ```
    pub fn icon_for(&self, name: &str) -> &str {
        let upper = name.to_uppercase();
        let provider = self
            .provider_rules
            .iter()
            .find(|rule| upper.contains(&rule.pattern.to_uppercase()));
        let technology = || {
            self.technology_rules
                .iter()
                .find(|rule| name.contains(rule.pattern.as_str()))
        };
        let keyword = || {
            self.keyword_rules
                .iter()
                .find(|rule| name.contains(rule.pattern.as_str()))
        };

        provider
            .or_else(technology)
            .or_else(keyword)
            .map_or(self.fallback_icon_code.as_str(), IconRule::icon)
    }

    /// Stroke color of architecture flows.
    pub fn flow_color(&self) -> Color {
        self.flow_color
    }

    /// Fill color of step badges.
    pub fn badge_color(&self) -> Color {
        self.badge_color
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            category_colors: default_category_colors(),
            category_icons: default_category_icons(),
            edge_colors: default_edge_colors(),
            provider_rules: rules(&[
                ("S3", "S3"),
                ("EC2", "EC2"),
                ("Lambda", "LAM"),
                ("RDS", "RDS"),
                ("DynamoDB", "DDB"),
                ("API Gateway", "API"),
                ("CloudWatch", "CW"),
                ("IAM", "IAM"),
                ("VPC", "VPC"),
                ("ELB", "ELB"),
            ]),
            technology_rules: rules(&[
                ("Python", "PY"),
                ("JavaScript", "JS"),
                ("TypeScript", "TS"),
                ("Java", "JV"),
                ("C++", "C+"),
                ("C", "C"),
                ("Go", "GO"),
                ("Rust", "RS"),
                ("Ruby", "RB"),
                ("PHP", "PHP"),
                ("C#", "C#"),
                ("Shell", "SH"),
                ("HTML", "HTML"),
                ("CSS", "CSS"),
                ("SQL", "SQL"),
                ("Docker", "DOC"),
                ("Kubernetes", "K8S"),
                ("AWS", "AWS"),
                ("Azure", "AZ"),
                ("GCP", "GCP"),
                ("MongoDB", "MDB"),
                ("PostgreSQL", "PG"),
                ("MySQL", "SQL"),
                ("Redis", "RDS"),
                ("Nginx", "NGX"),
                ("Apache", "APH"),
            ]),
            keyword_rules: rules(&[
                ("AWS", "AWS"),
                ("Database", "DB"),
                ("DB", "DB"),
                ("API", "API"),
                ("Web", "WEB"),
            ]),
            fallback_color: hex(0x95, 0xa5, 0xa6),
            fallback_icon: String::from("⚙️"),
            fallback_icon_code: String::from("SYS"),
            fallback_edge_color: hex(0x00, 0x7b, 0xff),
            flow_color: hex(0xff, 0x44, 0x44),
            badge_color: hex(0x66, 0x7e, 0xea),
        }
    }
}

fn rules(pairs: &[(&str, &str)]) -> Vec<IconRule> {
    pairs
        .iter()
        .map(|(pattern, icon)| IconRule::new(pattern, icon))
        .collect()
}

pub(crate) fn hex(r: u8, g: u8, b: u8) -> Color {
    Color::from_rgb8(r, g, b)
}

fn default_category_colors() -> IndexMap<String, Color> {
    [
        ("user", hex(0x34, 0x98, 0xdb)),
        ("database", hex(0xe7, 0x4c, 0x3c)),
        ("api", hex(0xf3, 0x9c, 0x12)),
        ("service", hex(0x9b, 0x59, 0xb6)),
        ("frontend", hex(0x2e, 0xcc, 0x71)),
        ("backend", hex(0x34, 0x49, 0x5e)),
        ("cloud", hex(0x1a, 0xbc, 0x9c)),
        ("language", hex(0xe6, 0x7e, 0x22)),
        ("storage", hex(0x95, 0xa5, 0xa6)),
    ]
    .into_iter()
    .map(|(name, color)| (name.to_string(), color))
    .collect()
}

fn default_category_icons() -> IndexMap<String, String> {
    [
        ("user", "👤"),
        ("database", "🗄️"),
        ("api", "🔌"),
        ("service", "⚙️"),
        ("frontend", "🖥️"),
        ("backend", "🔧"),
        ("cloud", "☁️"),
        ("code", "💻"),
        ("language", "📝"),
        ("storage", "📦"),
    ]
    .into_iter()
    .map(|(name, icon)| (name.to_string(), icon.to_string()))
    .collect()
}

fn default_edge_colors() -> IndexMap<String, Color> {
    [
        ("invoke", hex(0xff, 0x6b, 0x35)),
        ("query", hex(0x4e, 0xcd, 0xc4)),
        ("read/write", hex(0x45, 0xb7, 0xd1)),
        ("data_flow", hex(0x96, 0xce, 0xb4)),
        ("origin", hex(0xff, 0xea, 0xa7)),
    ]
    .into_iter()
    .map(|(name, color)| (name.to_string(), color))
    .collect()
}

fn merge_category_colors<'de, D>(deserializer: D) -> Result<IndexMap<String, Color>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut colors = default_category_colors();
    colors.extend(IndexMap::<String, Color>::deserialize(deserializer)?);
    Ok(colors)
}

fn merge_category_icons<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut icons = default_category_icons();
    icons.extend(IndexMap::<String, String>::deserialize(deserializer)?);
    Ok(icons)
}

fn merge_edge_colors<'de, D>(deserializer: D) -> Result<IndexMap<String, Color>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut colors = default_edge_colors();
    colors.extend(IndexMap::<String, Color>::deserialize(deserializer)?);
    Ok(colors)
}
