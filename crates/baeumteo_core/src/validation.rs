//! crates/baeumteo_core/src/validation.rs
//!
//! Input checks for the login, signup and onboarding forms.

use crate::domain::ParseEnumError;

/// A user-correctable input problem, shown inline next to the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("이메일과 비밀번호를 입력해주세요")]
    MissingCredentials,
    #[error("필수 약관에 동의해주세요")]
    ConsentRequired,
    #[error("모든 필수 항목을 입력해주세요")]
    MissingSignupFields,
    #[error("목표를 하나 이상 선택해주세요")]
    NoGoalsSelected,
    #[error("Unknown onboarding goal: {0}")]
    UnknownGoal(String),
    #[error("Invalid value: {0}")]
    InvalidValue(#[from] ParseEnumError),
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.email) || self.password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub phone: Option<String>,
    pub agree_terms: bool,
    pub agree_privacy: bool,
}

impl SignupForm {
    /// Consent is checked before the other fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.agree_terms || !self.agree_privacy {
            return Err(ValidationError::ConsentRequired);
        }
        if is_blank(&self.email) || self.password.is_empty() || is_blank(&self.display_name) {
            return Err(ValidationError::MissingSignupFields);
        }
        Ok(())
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup() -> SignupForm {
        SignupForm {
            email: "lee@example.com".to_string(),
            password: "secret".to_string(),
            display_name: "이철수".to_string(),
            phone: None,
            agree_terms: true,
            agree_privacy: true,
        }
    }

    #[test]
    fn login_requires_both_fields() {
        let ok = LoginForm {
            email: "a@b.com".to_string(),
            password: "pw".to_string(),
        };
        assert!(ok.validate().is_ok());
        let missing = LoginForm {
            email: "  ".to_string(),
            password: "pw".to_string(),
        };
        assert_eq!(missing.validate(), Err(ValidationError::MissingCredentials));
        assert_eq!(LoginForm::default().validate(), Err(ValidationError::MissingCredentials));
    }

    #[test]
    fn signup_checks_consent_first() {
        let form = SignupForm {
            agree_privacy: false,
            email: String::new(),
            ..signup()
        };
        assert_eq!(form.validate(), Err(ValidationError::ConsentRequired));
    }

    #[test]
    fn signup_requires_name_email_password() {
        assert!(signup().validate().is_ok());
        let form = SignupForm {
            display_name: String::new(),
            ..signup()
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingSignupFields));
    }
}
