//! Built-in synthetic profile for demos and offline testing

use crate::domain::{EducationEntry, ExperienceEntry, ProfileHeader, ProfileRecord};

fn experience(title: &str, company: &str, duration: &str, location: &str) -> ExperienceEntry {
    ExperienceEntry {
        title: title.to_string(),
        company: company.to_string(),
        duration: duration.to_string(),
        location: location.to_string(),
    }
}

fn education(school: &str, degree: &str, duration: &str) -> EducationEntry {
    EducationEntry {
        school: school.to_string(),
        degree: degree.to_string(),
        duration: duration.to_string(),
    }
}

/// Returns the fixed sample profile served for the fixture locator
pub fn fixture_profile() -> ProfileRecord {
    ProfileRecord::new(
        ProfileHeader::new(
            "John Doe",
            "Senior Software Engineer",
            "San Francisco Bay Area",
        ),
        vec![
            experience(
                "Senior Software Engineer",
                "Tech Corp",
                "2020 - Present",
                "San Francisco, CA",
            ),
            experience("Software Engineer", "StartUp Inc", "2018 - 2020", "New York, NY"),
        ],
        vec![
            education("Stanford University", "Master of Science in Computer Science", "2016 - 2018"),
            education("MIT", "Bachelor of Science in Computer Science", "2012 - 2016"),
        ],
        vec![
            "Just published a new article on AI and Machine Learning!".to_string(),
            "Excited to announce our latest product launch!".to_string(),
        ],
    )
}
