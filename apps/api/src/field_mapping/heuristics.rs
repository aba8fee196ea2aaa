//! Keyword heuristics for mapping a form field to a profile attribute when
//! no trusted platform rules exist and the AI assistant is unavailable.

use crate::matching::PhraseTable;
use crate::models::form::FormField;
use crate::models::profile::ProfileAttribute;

/// Evaluated top to bottom against a field's lowercased label, name, id and
/// placeholder. Order matters: "email address" must reach `Email` before
/// `Address`, "ethnicity" must reach `Ethnicity` before `City`.
const ATTRIBUTE_KEYWORDS: PhraseTable<ProfileAttribute> = PhraseTable::new(&[
    (
        ProfileAttribute::FirstName,
        &["first name", "firstname", "first_name", "fname", "given name", "given_name", "forename"],
    ),
    (
        ProfileAttribute::LastName,
        &["last name", "lastname", "last_name", "lname", "surname", "family name", "family_name"],
    ),
    (ProfileAttribute::Email, &["email", "e-mail", "mail"]),
    (ProfileAttribute::Phone, &["phone", "telephone", "mobile", "cell"]),
    (ProfileAttribute::LinkedInUrl, &["linkedin"]),
    (ProfileAttribute::GithubUrl, &["github"]),
    (ProfileAttribute::PortfolioUrl, &["portfolio", "website", "personal site"]),
    (ProfileAttribute::PreferredLocations, &["preferred location", "location preference"]),
    (ProfileAttribute::Ethnicity, &["ethnicity", "ethnic", "race", "hispanic", "latino"]),
    (ProfileAttribute::Address, &["address", "street"]),
    (ProfileAttribute::City, &["city", "town"]),
    (ProfileAttribute::State, &["state", "province", "region"]),
    (ProfileAttribute::ZipCode, &["zip", "postal", "postcode"]),
    (ProfileAttribute::Country, &["country", "nation"]),
    (ProfileAttribute::IsUsCitizen, &["citizen"]),
    (ProfileAttribute::VisaType, &["visa type", "type of visa", "visa status", "h1b", "h-1b"]),
    (ProfileAttribute::HasWorkVisa, &["work visa", "work permit"]),
    (ProfileAttribute::RequiresSponsorship, &["sponsor", "visa"]),
    (
        ProfileAttribute::WorkAuthorization,
        &["authorization", "authorized", "authorised", "eligib", "right to work"],
    ),
    (
        ProfileAttribute::DesiredSalary,
        &["salary", "compensation", "desired pay", "expected pay"],
    ),
    (ProfileAttribute::YearsOfExperience, &["years of experience", "experience", "years"]),
    (ProfileAttribute::GraduationYear, &["graduation", "grad year", "grad_year"]),
    (ProfileAttribute::HighestDegree, &["degree", "education"]),
    (ProfileAttribute::University, &["university", "school", "college"]),
    (ProfileAttribute::Major, &["major", "field of study", "discipline"]),
    (ProfileAttribute::VeteranStatus, &["veteran", "military"]),
    (ProfileAttribute::DisabilityStatus, &["disability", "disabled"]),
    (ProfileAttribute::Gender, &["gender", "sex"]),
    (
        ProfileAttribute::AvailableStartDate,
        &["start date", "availability", "available", "when can", "notice period"],
    ),
    (ProfileAttribute::WillingToRelocate, &["relocate", "relocation", "willing to move"]),
    (ProfileAttribute::DesiredJobTitle, &["job title", "desired position", "position"]),
]);

/// The first attribute whose keywords appear in the field's descriptors.
pub fn infer_attribute(field: &FormField) -> Option<ProfileAttribute> {
    ATTRIBUTE_KEYWORDS.first_match(&field.descriptor_text())
}
