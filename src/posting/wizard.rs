// src/posting/wizard.rs
//! Four-step posting wizard. A step can only be left forward once its own
//! fields validate, and publishing needs the whole form to validate.

use crate::posting::schema::{FieldError, JobPostingForm};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PostingStep {
    JobDetails,
    Description,
    Company,
    Application,
}

impl PostingStep {
    pub const COUNT: u8 = 4;

    pub fn number(&self) -> u8 {
        match self {
            PostingStep::JobDetails => 1,
            PostingStep::Description => 2,
            PostingStep::Company => 3,
            PostingStep::Application => 4,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(PostingStep::JobDetails),
            2 => Some(PostingStep::Description),
            3 => Some(PostingStep::Company),
            4 => Some(PostingStep::Application),
            _ => None,
        }
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// Form fields collected on this step
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            PostingStep::JobDetails => &[
                "title",
                "jobType",
                "experienceLevel",
                "location",
                "salaryMin",
                "salaryMax",
                "salaryCurrency",
                "salaryPeriod",
            ],
            PostingStep::Description => &[
                "description",
                "responsibilities",
                "requirements",
                "benefits",
                "skills",
            ],
            PostingStep::Company => &[
                "companyName",
                "companyWebsite",
                "companyDescription",
                "companyIndustry",
                "companySize",
            ],
            PostingStep::Application => &[
                "applicationEmail",
                "applicationUrl",
                "applicationInstructions",
                "isRemote",
                "isUrgent",
                "isFeatured",
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostingWizard {
    step: PostingStep,
    form: JobPostingForm,
}

impl Default for PostingWizard {
    fn default() -> Self {
        Self::new(JobPostingForm::default())
    }
}

impl PostingWizard {
    pub fn new(form: JobPostingForm) -> Self {
        Self {
            step: PostingStep::JobDetails,
            form,
        }
    }

    /// Re-open a wizard on a given step, e.g. when a client re-checks a step
    /// it already reached. Earlier steps are not re-validated.
    pub fn resume_at(form: JobPostingForm, step: PostingStep) -> Self {
        Self { step, form }
    }

    /// Publishing is possible on the last step once the whole schema holds
    pub fn can_submit(&self) -> bool {
        self.step == PostingStep::Application && self.form.validate().is_empty()
    }

    pub fn step(&self) -> PostingStep {
        self.step
    }

    pub fn step_errors(&self) -> Vec<FieldError> {
        self.form.validate_fields(self.step.fields())
    }

    /// Move to the next step if the current one validates
    pub fn advance(&mut self) -> Result<PostingStep, Vec<FieldError>> {
        let errors = self.step_errors();
        if !errors.is_empty() {
            return Err(errors);
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Final submission: last step reached and the whole schema validates
    pub fn submit(&self) -> Result<&JobPostingForm, Vec<FieldError>> {
        if self.step != PostingStep::Application {
            let mut errors = Vec::new();
            let mut step = Some(self.step);
            while let Some(current) = step {
                errors.extend(self.form.validate_fields(current.fields()));
                step = current.next();
            }
            if errors.is_empty() {
                errors.push(FieldError {
                    field: "step".to_string(),
                    message: format!(
                        "Complete step {} of {} before publishing",
                        self.step.number(),
                        PostingStep::COUNT
                    ),
                });
            }
            return Err(errors);
        }

        let errors = self.form.validate();
        if errors.is_empty() {
            Ok(&self.form)
        } else {
            Err(errors)
        }
    }
}
