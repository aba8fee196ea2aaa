use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed vocabulary of profile attributes a form field can be filled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileAttribute {
    FirstName,
    LastName,
    Email,
    Phone,
    LinkedInUrl,
    GithubUrl,
    PortfolioUrl,
    Address,
    City,
    State,
    ZipCode,
    Country,
    WorkAuthorization,
    RequiresSponsorship,
    IsUsCitizen,
    HasWorkVisa,
    VisaType,
    DesiredSalary,
    DesiredJobTitle,
    YearsOfExperience,
    HighestDegree,
    University,
    GraduationYear,
    Major,
    VeteranStatus,
    DisabilityStatus,
    Gender,
    Ethnicity,
    AvailableStartDate,
    WillingToRelocate,
    PreferredLocations,
}

impl ProfileAttribute {
    pub const ALL: [ProfileAttribute; 31] = [
        ProfileAttribute::FirstName,
        ProfileAttribute::LastName,
        ProfileAttribute::Email,
        ProfileAttribute::Phone,
        ProfileAttribute::LinkedInUrl,
        ProfileAttribute::GithubUrl,
        ProfileAttribute::PortfolioUrl,
        ProfileAttribute::Address,
        ProfileAttribute::City,
        ProfileAttribute::State,
        ProfileAttribute::ZipCode,
        ProfileAttribute::Country,
        ProfileAttribute::WorkAuthorization,
        ProfileAttribute::RequiresSponsorship,
        ProfileAttribute::IsUsCitizen,
        ProfileAttribute::HasWorkVisa,
        ProfileAttribute::VisaType,
        ProfileAttribute::DesiredSalary,
        ProfileAttribute::DesiredJobTitle,
        ProfileAttribute::YearsOfExperience,
        ProfileAttribute::HighestDegree,
        ProfileAttribute::University,
        ProfileAttribute::GraduationYear,
        ProfileAttribute::Major,
        ProfileAttribute::VeteranStatus,
        ProfileAttribute::DisabilityStatus,
        ProfileAttribute::Gender,
        ProfileAttribute::Ethnicity,
        ProfileAttribute::AvailableStartDate,
        ProfileAttribute::WillingToRelocate,
        ProfileAttribute::PreferredLocations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileAttribute::FirstName => "firstName",
            ProfileAttribute::LastName => "lastName",
            ProfileAttribute::Email => "email",
            ProfileAttribute::Phone => "phone",
            ProfileAttribute::LinkedInUrl => "linkedInUrl",
            ProfileAttribute::GithubUrl => "githubUrl",
            ProfileAttribute::PortfolioUrl => "portfolioUrl",
            ProfileAttribute::Address => "address",
            ProfileAttribute::City => "city",
            ProfileAttribute::State => "state",
            ProfileAttribute::ZipCode => "zipCode",
            ProfileAttribute::Country => "country",
            ProfileAttribute::WorkAuthorization => "workAuthorization",
            ProfileAttribute::RequiresSponsorship => "requiresSponsorship",
            ProfileAttribute::IsUsCitizen => "isUsCitizen",
            ProfileAttribute::HasWorkVisa => "hasWorkVisa",
            ProfileAttribute::VisaType => "visaType",
            ProfileAttribute::DesiredSalary => "desiredSalary",
            ProfileAttribute::DesiredJobTitle => "desiredJobTitle",
            ProfileAttribute::YearsOfExperience => "yearsOfExperience",
            ProfileAttribute::HighestDegree => "highestDegree",
            ProfileAttribute::University => "university",
            ProfileAttribute::GraduationYear => "graduationYear",
            ProfileAttribute::Major => "major",
            ProfileAttribute::VeteranStatus => "veteranStatus",
            ProfileAttribute::DisabilityStatus => "disabilityStatus",
            ProfileAttribute::Gender => "gender",
            ProfileAttribute::Ethnicity => "ethnicity",
            ProfileAttribute::AvailableStartDate => "availableStartDate",
            ProfileAttribute::WillingToRelocate => "willingToRelocate",
            ProfileAttribute::PreferredLocations => "preferredLocations",
        }
    }
}

impl fmt::Display for ProfileAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAttribute(pub String);

impl fmt::Display for UnknownAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown profile attribute '{}'", self.0)
    }
}

impl std::error::Error for UnknownAttribute {}

impl FromStr for ProfileAttribute {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ProfileAttribute::ALL
            .iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| UnknownAttribute(s.to_string()))
    }
}

/// A user's application profile. Supplied by the caller on every autofill request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linked_in_url: Option<String>,
    pub github_url: Option<String>,
    pub portfolio_url: Option<String>,

    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,

    pub work_authorization: Option<String>,
    pub requires_sponsorship: bool,
    pub is_us_citizen: bool,
    pub has_work_visa: bool,
    pub visa_type: Option<String>,

    pub desired_salary: Option<String>,
    pub desired_job_title: Option<String>,
    pub years_of_experience: Option<String>,

    pub highest_degree: Option<String>,
    pub university: Option<String>,
    pub graduation_year: Option<String>,
    pub major: Option<String>,

    // EEO
    pub veteran_status: Option<String>,
    pub disability_status: Option<String>,
    pub gender: Option<String>,
    pub ethnicity: Option<String>,

    pub available_start_date: Option<String>,
    pub willing_to_relocate: bool,
    /// Comma-separated.
    pub preferred_locations: Option<String>,
}

impl Profile {
    /// Resolves an attribute to the value that should be typed into a form.
    /// Flags render as "Yes"/"No"; blank text values resolve to `None`.
    pub fn get_attribute(&self, attribute: ProfileAttribute) -> Option<String> {
        let text = match attribute {
            ProfileAttribute::FirstName => &self.first_name,
            ProfileAttribute::LastName => &self.last_name,
            ProfileAttribute::Email => &self.email,
            ProfileAttribute::Phone => &self.phone,
            ProfileAttribute::LinkedInUrl => &self.linked_in_url,
            ProfileAttribute::GithubUrl => &self.github_url,
            ProfileAttribute::PortfolioUrl => &self.portfolio_url,
            ProfileAttribute::Address => &self.address,
            ProfileAttribute::City => &self.city,
            ProfileAttribute::State => &self.state,
            ProfileAttribute::ZipCode => &self.zip_code,
            ProfileAttribute::Country => &self.country,
            ProfileAttribute::WorkAuthorization => &self.work_authorization,
            ProfileAttribute::VisaType => &self.visa_type,
            ProfileAttribute::DesiredSalary => &self.desired_salary,
            ProfileAttribute::DesiredJobTitle => &self.desired_job_title,
            ProfileAttribute::YearsOfExperience => &self.years_of_experience,
            ProfileAttribute::HighestDegree => &self.highest_degree,
            ProfileAttribute::University => &self.university,
            ProfileAttribute::GraduationYear => &self.graduation_year,
            ProfileAttribute::Major => &self.major,
            ProfileAttribute::VeteranStatus => &self.veteran_status,
            ProfileAttribute::DisabilityStatus => &self.disability_status,
            ProfileAttribute::Gender => &self.gender,
            ProfileAttribute::Ethnicity => &self.ethnicity,
            ProfileAttribute::AvailableStartDate => &self.available_start_date,
            ProfileAttribute::PreferredLocations => &self.preferred_locations,
            ProfileAttribute::RequiresSponsorship => return Some(yes_no(self.requires_sponsorship)),
            ProfileAttribute::IsUsCitizen => return Some(yes_no(self.is_us_citizen)),
            ProfileAttribute::HasWorkVisa => return Some(yes_no(self.has_work_visa)),
            ProfileAttribute::WillingToRelocate => return Some(yes_no(self.willing_to_relocate)),
        };

        text.as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

fn yes_no(flag: bool) -> String {
    let answer = if flag { "Yes" } else { "No" };
    answer.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_names_round_trip_through_from_str() {
        for attribute in ProfileAttribute::ALL {
            assert_eq!(attribute.as_str().parse::<ProfileAttribute>(), Ok(attribute));
        }
    }

    #[test]
    fn test_attribute_serde_matches_as_str() {
        let json = serde_json::to_string(&ProfileAttribute::LinkedInUrl).unwrap();
        assert_eq!(json, "\"linkedInUrl\"");
        let parsed: ProfileAttribute = serde_json::from_str("\"isUsCitizen\"").unwrap();
        assert_eq!(parsed, ProfileAttribute::IsUsCitizen);
    }

    #[test]
    fn test_unknown_attribute_is_rejected() {
        assert!("favouriteColour".parse::<ProfileAttribute>().is_err());
    }

    #[test]
    fn test_blank_values_resolve_to_none() {
        let profile = Profile {
            first_name: Some("   ".to_string()),
            city: None,
            ..Default::default()
        };
        assert_eq!(profile.get_attribute(ProfileAttribute::FirstName), None);
        assert_eq!(profile.get_attribute(ProfileAttribute::City), None);
    }

    #[test]
    fn test_flags_render_yes_no() {
        let profile = Profile {
            requires_sponsorship: true,
            ..Default::default()
        };
        assert_eq!(
            profile.get_attribute(ProfileAttribute::RequiresSponsorship).as_deref(),
            Some("Yes")
        );
        assert_eq!(
            profile.get_attribute(ProfileAttribute::WillingToRelocate).as_deref(),
            Some("No")
        );
    }
}
