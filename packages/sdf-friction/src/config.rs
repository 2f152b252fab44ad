//! Friction profiles: which links get which coefficients, and in which model.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PatchError, Result};

/// Name of the model patched by the built-in profile.
pub const DEFAULT_TARGET_MODEL: &str = "k9_robot";

/// Built-in friction values: `(link, mu, mu2)`.
pub const DEFAULT_LINK_FRICTION: &[(&str, f64, f64)] = &[
    ("drivewhl_l_link", 1.1, 0.9),
    ("drivewhl_r_link", 1.1, 0.9),
    ("caster_wheel_link", 0.3, 0.15),
];

/// Primary and secondary Coulomb friction coefficients for the ODE solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrictionPair {
    pub mu: f64,
    pub mu2: f64,
}

impl FrictionPair {
    #[must_use]
    pub const fn new(mu: f64, mu2: f64) -> Self {
        Self { mu, mu2 }
    }
}

/// Friction assigned to a single link, matched by its `name` attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkFriction {
    pub name: String,
    pub mu: f64,
    pub mu2: f64,
}

impl LinkFriction {
    #[must_use]
    pub fn pair(&self) -> FrictionPair {
        FrictionPair::new(self.mu, self.mu2)
    }
}

/// Complete patching configuration.
///
/// Links are processed in the order they are declared. A `target_model` of
/// `None` (or an empty string) patches every model in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrictionProfile {
    #[serde(default)]
    pub target_model: Option<String>,
    pub links: Vec<LinkFriction>,
}

impl Default for FrictionProfile {
    fn default() -> Self {
        Self {
            target_model: Some(DEFAULT_TARGET_MODEL.to_string()),
            links: DEFAULT_LINK_FRICTION
                .iter()
                .map(|&(name, mu, mu2)| LinkFriction {
                    name: name.to_string(),
                    mu,
                    mu2,
                })
                .collect(),
        }
    }
}

impl FrictionProfile {
    /// Load and validate a profile from a YAML file.
    ///
    /// # Examples
    /// ```no_run
    /// use sdf_friction::config::FrictionProfile;
    ///
    /// let profile = FrictionProfile::from_yaml_file("friction.yaml".as_ref()).unwrap();
    /// assert!(!profile.links.is_empty());
    /// ```
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| PatchError::io(path, e))?;
        let profile: Self =
            serde_yaml_ng::from_str(&content).map_err(|source| PatchError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        profile.validate()?;
        Ok(profile)
    }

    /// Check that link names are unique and coefficients are usable.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for link in &self.links {
            if link.name.is_empty() {
                return Err(PatchError::EmptyLinkName);
            }
            if !seen.insert(link.name.as_str()) {
                return Err(PatchError::DuplicateLink(link.name.clone()));
            }
            validate_coefficient(&link.name, link.mu)?;
            validate_coefficient(&link.name, link.mu2)?;
        }
        Ok(())
    }

    /// Replace the model filter. Empty names disable filtering.
    #[must_use]
    pub fn with_target_model(mut self, target: Option<String>) -> Self {
        self.target_model = target;
        self
    }

    /// The effective model filter, treating an empty name as "match all".
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target_model.as_deref().filter(|name| !name.is_empty())
    }

    /// Whether a model with the given `name` attribute should be patched.
    #[must_use]
    pub fn matches_model(&self, name: Option<&str>) -> bool {
        match self.target() {
            Some(target) => name == Some(target),
            None => true,
        }
    }
}

fn validate_coefficient(link: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PatchError::InvalidCoefficient {
            link: link.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_profile() {
        let profile = FrictionProfile::default();
        assert_eq!(profile.target(), Some("k9_robot"));

        let names: Vec<_> = profile.links.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["drivewhl_l_link", "drivewhl_r_link", "caster_wheel_link"]
        );
        assert_eq!(profile.links[2].pair(), FrictionPair::new(0.3, 0.15));
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_empty_target_matches_all() {
        let profile = FrictionProfile::default().with_target_model(Some(String::new()));
        assert_eq!(profile.target(), None);
        assert!(profile.matches_model(Some("other_robot")));
        assert!(profile.matches_model(None));
    }

    #[test]
    fn test_target_requires_exact_name() {
        let profile = FrictionProfile::default();
        assert!(profile.matches_model(Some("k9_robot")));
        assert!(!profile.matches_model(Some("k9_robot_v2")));
        assert!(!profile.matches_model(None));
    }

    #[test]
    fn test_validate_rejects_negative_coefficient() {
        let mut profile = FrictionProfile::default();
        profile.links[0].mu2 = -0.5;
        assert!(matches!(
            profile.validate(),
            Err(PatchError::InvalidCoefficient { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut profile = FrictionProfile::default();
        profile.links[1].mu = f64::NAN;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let mut profile = FrictionProfile::default();
        profile.links.push(profile.links[0].clone());
        assert!(matches!(
            profile.validate(),
            Err(PatchError::DuplicateLink(name)) if name == "drivewhl_l_link"
        ));
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "links:\n  - name: front_wheel\n    mu: 0.8\n    mu2: 0.6\n  - name: rear_wheel\n    mu: 1.0\n    mu2: 1.0"
        )
        .unwrap();

        let profile = FrictionProfile::from_yaml_file(file.path()).unwrap();
        assert_eq!(profile.target_model, None);
        assert_eq!(profile.links.len(), 2);
        assert_eq!(profile.links[0].name, "front_wheel");
        assert_eq!(profile.links[1].pair(), FrictionPair::new(1.0, 1.0));
    }

    #[test]
    fn test_from_yaml_file_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "links: not-a-list").unwrap();

        assert!(matches!(
            FrictionProfile::from_yaml_file(file.path()),
            Err(PatchError::ConfigParse { .. })
        ));
    }
}
