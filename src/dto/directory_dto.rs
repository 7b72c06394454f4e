use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMarketerPayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub expertise: Vec<String>,
    pub bio: Option<String>,
    #[validate(url)]
    pub portfolio_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVcPayload {
    #[validate(length(min = 1))]
    pub firm_name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub focus_areas: Vec<String>,
    #[validate(url)]
    pub website: Option<String>,
    pub bio: Option<String>,
}
