use crate::domain::BreweryPatch;
use brewfest_errors::AppError;

const MAX_NAME_LENGTH: usize = 120;
const MAX_DESCRIPTION_LENGTH: usize = 2000;
const MAX_URL_LENGTH: usize = 2048;
const MAX_VOTER_LENGTH: usize = 128;

const ALLOWED_SCHEMES: &[&str] = &["http", "https"];
const VOTER_PATTERN: &str = r"^[A-Za-z0-9_@.+\-]+$";

pub struct InputSanitizer;

impl InputSanitizer {
    /// Trims and collapses runs of whitespace.
    pub fn validate_name(name: &str) -> Result<String, AppError> {
        let whitespace = regex_lite::Regex::new(r"\s+")
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let name = whitespace.replace_all(name.trim(), " ").to_string();

        if name.is_empty() {
            return Err(AppError::Validation("Brewery name is required".to_string()));
        }

        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(AppError::Validation(format!(
                "Brewery name must be at most {} characters",
                MAX_NAME_LENGTH
            )));
        }

        Ok(name)
    }

    pub fn validate_description(description: &str) -> Result<String, AppError> {
        let description: String = description
            .trim()
            .chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
            .collect();

        if description.is_empty() {
            return Err(AppError::Validation("Description is required".to_string()));
        }

        if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(AppError::Validation(format!(
                "Description must be at most {} characters",
                MAX_DESCRIPTION_LENGTH
            )));
        }

        Ok(description)
    }

    pub fn validate_url(field: &str, url: &str) -> Result<String, AppError> {
        let url = url.trim();

        if url.is_empty() {
            return Err(AppError::Validation(format!("{} is required", field)));
        }

        if url.len() > MAX_URL_LENGTH {
            return Err(AppError::Validation(format!("{} is too long", field)));
        }

        let parsed = url::Url::parse(url)
            .map_err(|_| AppError::Validation(format!("{} must be a valid URL", field)))?;

        let scheme = parsed.scheme().to_lowercase();
        if !ALLOWED_SCHEMES.contains(&scheme.as_str()) {
            return Err(AppError::Validation(format!(
                "{} must use http or https",
                field
            )));
        }

        if parsed.host_str().is_none() {
            return Err(AppError::Validation(format!("{} must have a host", field)));
        }

        Ok(parsed.to_string())
    }

    pub fn validate_voter_identity(voter: &str) -> Result<String, AppError> {
        let voter = voter.trim();

        if voter.is_empty() {
            return Err(AppError::Validation("Voter identity is required".to_string()));
        }

        if voter.len() > MAX_VOTER_LENGTH {
            return Err(AppError::Validation("Voter identity is too long".to_string()));
        }

        let pattern =
            regex_lite::Regex::new(VOTER_PATTERN).map_err(|e| AppError::Internal(e.to_string()))?;
        if !pattern.is_match(voter) {
            return Err(AppError::Validation(
                "Voter identity contains invalid characters".to_string(),
            ));
        }

        Ok(voter.to_string())
    }

    /// Validates every provided field of a partial update.
    pub fn clean_patch(patch: BreweryPatch) -> Result<BreweryPatch, AppError> {
        Ok(BreweryPatch {
            name: patch.name.as_deref().map(Self::validate_name).transpose()?,
            description: patch
                .description
                .as_deref()
                .map(Self::validate_description)
                .transpose()?,
            location_url: patch
                .location_url
                .as_deref()
                .map(|u| Self::validate_url("Location link", u))
                .transpose()?,
            logo_url: patch
                .logo_url
                .as_deref()
                .map(|u| Self::validate_url("Logo URL", u))
                .transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_trimmed_and_collapsed() {
        assert_eq!(
            InputSanitizer::validate_name("  Sak   Pub \t Brewing ").unwrap(),
            "Sak Pub Brewing"
        );
    }

    #[test]
    fn test_required_fields() {
        assert!(InputSanitizer::validate_name("   ").is_err());
        assert!(InputSanitizer::validate_description("\n\t").is_err());
        assert!(InputSanitizer::validate_url("Location link", "").is_err());
    }

    #[test]
    fn test_description_strips_control_characters() {
        assert_eq!(
            InputSanitizer::validate_description("Hazy\u{0007} IPA\nsince 2019").unwrap(),
            "Hazy IPA\nsince 2019"
        );
    }

    #[test]
    fn test_valid_url() {
        assert!(InputSanitizer::validate_url("Location link", "https://maps.google.com/?q=booth+4").is_ok());
        assert!(InputSanitizer::validate_url("Logo URL", "http://res.cloudinary.com/x/beers/a.png").is_ok());
    }

    #[test]
    fn test_invalid_url() {
        assert!(InputSanitizer::validate_url("Location link", "booth 4").is_err());
        assert!(InputSanitizer::validate_url("Location link", "ftp://example.com").is_err());
        assert!(InputSanitizer::validate_url("Location link", "javascript:alert(1)").is_err());
    }

    #[test]
    fn test_voter_identity() {
        assert!(InputSanitizer::validate_voter_identity("anon_1a2b3c").is_ok());
        assert!(InputSanitizer::validate_voter_identity("someone+fest@gmail.com").is_ok());
        assert!(InputSanitizer::validate_voter_identity("").is_err());
        assert!(InputSanitizer::validate_voter_identity("drop table;").is_err());
        assert!(InputSanitizer::validate_voter_identity(&"a".repeat(200)).is_err());
    }

    #[test]
    fn test_clean_patch_keeps_absent_fields_absent() {
        let patch = BreweryPatch {
            name: Some("  Black   Bamboo ".to_string()),
            ..Default::default()
        };

        let cleaned = InputSanitizer::clean_patch(patch).unwrap();

        assert_eq!(cleaned.name.as_deref(), Some("Black Bamboo"));
        assert!(cleaned.description.is_none());
        assert!(cleaned.location_url.is_none());
    }

    #[test]
    fn test_clean_patch_rejects_blank_field() {
        let patch = BreweryPatch {
            description: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(InputSanitizer::clean_patch(patch).is_err());
    }
}
