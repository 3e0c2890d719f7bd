//! Skill database - parsing, storage, and file generation

use bevy::prelude::*;
use std::fs;
use std::path::Path;

use crate::ball::SizeClass;

/// One draggable skill icon. Physics only reads `size`.
#[derive(Clone, Debug, PartialEq)]
pub struct Skill {
    pub name: String,
    /// Icon/label color
    pub color: Color,
    /// Disc fill color
    pub background: Color,
    pub size: SizeClass,
}

impl Skill {
    /// Create a skill from hex colors; malformed hex falls back to white/black
    pub fn new(name: &str, color: &str, background: &str, size: SizeClass) -> Self {
        Self {
            name: name.to_string(),
            color: parse_hex(color).unwrap_or(Color::WHITE),
            background: parse_hex(background).unwrap_or(Color::BLACK),
            size,
        }
    }

    /// Short label drawn on the disc
    pub fn short_label(&self) -> String {
        self.name.chars().take(3).collect()
    }
}

/// Database of the skills shown in the widget, in draw order
#[derive(Resource, Clone, Debug)]
pub struct SkillDatabase {
    pub skills: Vec<Skill>,
}

impl Default for SkillDatabase {
    fn default() -> Self {
        Self::default_skills()
    }
}

impl SkillDatabase {
    /// Load skills from file, creating the default file if it doesn't exist
    pub fn load_or_create(path: &str) -> Self {
        if !Path::new(path).exists() {
            info!("Skills file not found, creating default: {}", path);
            let defaults = Self::default_skills();
            if let Err(e) = defaults.write_to_file(path) {
                warn!("Failed to write default skills file: {}", e);
            }
            return defaults;
        }

        match fs::read_to_string(path) {
            Ok(content) => {
                let db = Self::parse(&content);
                if db.skills.is_empty() {
                    warn!("No skills found in {}, using defaults", path);
                    return Self::default_skills();
                }
                info!("Loaded {} skills from {}", db.skills.len(), path);
                db
            }
            Err(e) => {
                warn!("Failed to load skills from {}: {}, using defaults", path, e);
                Self::default_skills()
            }
        }
    }

    /// Write skills to file
    pub fn write_to_file(&self, path: &str) -> std::io::Result<()> {
        let mut content = String::new();
        content.push_str("# Skill Balls\n");
        content.push_str("# ===========\n");
        content.push_str("#\n");
        content.push_str("# Format:\n");
        content.push_str("#   skill: <name>              Start a new skill\n");
        content.push_str("#   color: #rrggbb             Label color\n");
        content.push_str("#   background: #rrggbb        Ball fill color\n");
        content.push_str("#   size: large|medium|small   Size class (defaults to large)\n");
        content.push_str("#\n");
        content.push_str("# Blank lines and # comments are ignored.\n");
        content.push('\n');

        for skill in &self.skills {
            content.push_str(&format!("skill: {}\n", skill.name));
            content.push_str(&format!("color: {}\n", to_hex(&skill.color)));
            content.push_str(&format!("background: {}\n", to_hex(&skill.background)));
            content.push_str(&format!("size: {}\n", skill.size.name()));
            content.push('\n');
        }

        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)
    }

    /// Parse skill data from string. Incomplete entries are skipped.
    pub fn parse(content: &str) -> Self {
        let mut skills = Vec::new();
        let mut current: Option<SkillBuilder> = None;

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(name) = line.strip_prefix("skill:") {
                if let Some(skill) = current.take().and_then(SkillBuilder::build) {
                    skills.push(skill);
                }
                current = Some(SkillBuilder::new(name.trim()));
                continue;
            }

            let Some(builder) = current.as_mut() else {
                continue;
            };

            if let Some(value) = line.strip_prefix("color:") {
                builder.color = parse_hex(value.trim());
            } else if let Some(value) = line.strip_prefix("background:") {
                builder.background = parse_hex(value.trim());
            } else if let Some(value) = line.strip_prefix("size:") {
                match SizeClass::from_name(value.trim()) {
                    Some(size) => builder.size = size,
                    None => warn!("Unknown size '{}' for skill {}", value.trim(), builder.name),
                }
            }
        }

        if let Some(skill) = current.and_then(SkillBuilder::build) {
            skills.push(skill);
        }

        Self { skills }
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Skill> {
        self.skills.get(index)
    }

    /// The tech stack shown on the portfolio page
    pub fn default_skills() -> Self {
        use SizeClass::Large;
        Self {
            skills: vec![
                Skill::new("JavaScript", "#F7DF1E", "#323330", Large),
                Skill::new("React", "#61DAFB", "#20232A", Large),
                Skill::new("Next.js", "#FFFFFF", "#000000", Large),
                Skill::new("Node.js", "#339933", "#F0F0F0", Large),
                Skill::new("Python", "#3776AB", "#FFD43B", Large),
                Skill::new("TypeScript", "#FFFFFF", "#3178C6", Large),
                Skill::new("Flutter", "#02569B", "#F0F0F0", Large),
                Skill::new("Tailwind", "#06B6D4", "#0F172A", Large),
                Skill::new("Express", "#FFFFFF", "#000000", Large),
                Skill::new("MongoDB", "#47A248", "#F0F0F0", Large),
                Skill::new("PostgreSQL", "#4169E1", "#F0F0F0", Large),
                Skill::new("Firebase", "#FFCA28", "#1A1A2E", Large),
                Skill::new("Redis", "#DC382D", "#F0F0F0", Large),
                Skill::new("Git", "#F05032", "#F0F0F0", Large),
                Skill::new("Docker", "#2496ED", "#F0F0F0", Large),
                Skill::new("Kubernetes", "#326CE5", "#FFFFFF", Large),
            ],
        }
    }
}

/// Helper for incremental parsing
struct SkillBuilder {
    name: String,
    color: Option<Color>,
    background: Option<Color>,
    size: SizeClass,
}

impl SkillBuilder {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            color: None,
            background: None,
            size: SizeClass::Large,
        }
    }

    fn build(self) -> Option<Skill> {
        if self.name.is_empty() {
            return None;
        }
        Some(Skill {
            name: self.name,
            color: self.color?,
            background: self.background?,
            size: self.size,
        })
    }
}

/// Parse `#rrggbb` (or `rrggbb`) into a color
pub fn parse_hex(value: &str) -> Option<Color> {
    Srgba::hex(value).ok().map(Color::Srgba)
}

/// Format a color as `#rrggbb`
pub fn to_hex(color: &Color) -> String {
    let srgba = color.to_srgba();
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        channel(srgba.red),
        channel(srgba.green),
        channel(srgba.blue)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster() {
        let db = SkillDatabase::default_skills();
        assert_eq!(db.len(), 16);
        assert_eq!(db.get(0).map(|s| s.name.as_str()), Some("JavaScript"));
        assert!(db.skills.iter().all(|s| s.size == SizeClass::Large));
    }

    #[test]
    fn test_parse_skills() {
        let content = r#"
# comment
skill: Rust
color: #dea584
background: #000000
size: medium

skill: Broken
color: #ffffff

skill: Go
color: #00ADD8
background: #ffffff
"#;
        let db = SkillDatabase::parse(content);
        assert_eq!(db.len(), 2);
        assert_eq!(db.skills[0].name, "Rust");
        assert_eq!(db.skills[0].size, SizeClass::Medium);
        assert_eq!(db.skills[1].name, "Go");
        assert_eq!(db.skills[1].size, SizeClass::Large);
    }

    #[test]
    fn test_hex_round_trip_through_file_format() {
        let db = SkillDatabase::default_skills();
        let skill = &db.skills[4];
        assert_eq!(to_hex(&skill.background), "#ffd43b");
        assert_eq!(parse_hex(&to_hex(&skill.color)), Some(skill.color));
    }
}
