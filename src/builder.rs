use crate::{
    common::{error::ShapeResult, settings::SettingsBag},
    eye,
    generator::ShapeGenerator,
    pupil,
    render::Style,
};

/// Assembles a [`Style`] from registry names. The eye defaults to `square`; without an
/// explicit pupil the eye's suggested pupil is used.
#[derive(Debug, Clone, Default)]
pub struct StyleBuilder {
    eye: Option<String>,
    eye_settings: Option<SettingsBag>,
    pupil: Option<String>,
    pupil_settings: Option<SettingsBag>,
}

impl StyleBuilder {
    pub const DEFAULT_EYE: &'static str = "square";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn eye(&mut self, name: &str) -> &mut Self {
        self.eye = Some(name.to_string());
        self
    }

    pub fn eye_settings(&mut self, settings: SettingsBag) -> &mut Self {
        self.eye_settings = Some(settings);
        self
    }

    pub fn pupil(&mut self, name: &str) -> &mut Self {
        self.pupil = Some(name.to_string());
        self
    }

    pub fn unset_pupil(&mut self) -> &mut Self {
        self.pupil = None;
        self.pupil_settings = None;
        self
    }

    pub fn pupil_settings(&mut self, settings: SettingsBag) -> &mut Self {
        self.pupil_settings = Some(settings);
        self
    }

    pub fn metadata(&self) -> String {
        let eye = self.eye.as_deref().unwrap_or(Self::DEFAULT_EYE);
        match self.pupil.as_deref() {
            Some(pupil) => format!("{{ Eye: {eye}, Pupil: {pupil} }}"),
            None => format!("{{ Eye: {eye}, Pupil: Default }}"),
        }
    }

    pub fn build(&self) -> ShapeResult<Style> {
        tracing::debug!(style = %self.metadata(), "Building style");

        let eye_name = self.eye.as_deref().unwrap_or(Self::DEFAULT_EYE);
        let eye = eye::named(eye_name, self.eye_settings.as_ref())?;

        let pupil = match self.pupil.as_deref() {
            Some(name) => pupil::named(name, self.pupil_settings.as_ref())?,
            None => {
                let mut pupil = eye.default_pupil();
                if let Some(settings) = &self.pupil_settings {
                    pupil.apply_settings(settings);
                }
                pupil
            }
        };

        Ok(Style::new(eye, pupil))
    }
}

#[cfg(test)]
mod style_builder_tests {
    use super::StyleBuilder;
    use crate::generator::ShapeGenerator;
    use crate::common::{
        error::ShapeError,
        settings::{keys, SettingValue, SettingsBag},
    };

    #[test]
    fn test_metadata() {
        let mut builder = StyleBuilder::new();
        assert_eq!(builder.metadata(), "{ Eye: square, Pupil: Default }");
        builder.eye("circle").pupil("seal");
        assert_eq!(builder.metadata(), "{ Eye: circle, Pupil: seal }");
        builder.unset_pupil();
        assert_eq!(builder.metadata(), "{ Eye: circle, Pupil: Default }");
    }

    #[test]
    fn test_defaults() {
        let style = StyleBuilder::new().build().unwrap();
        assert_eq!(style.eye().name(), "square");
        assert_eq!(style.pupil().name(), "square");
    }

    #[test]
    fn test_default_pupil_follows_eye() {
        let style = StyleBuilder::new().eye("ufo").build().unwrap();
        assert_eq!(style.pupil().name(), "roundedRect");
    }

    #[test]
    fn test_settings_applied() {
        let style = StyleBuilder::new()
            .eye("pixels")
            .eye_settings(SettingsBag::new().with(keys::CORNER_RADIUS_FRACTION, 0.5))
            .pupil_settings(SettingsBag::new().with(keys::CORNER_RADIUS_FRACTION, 2.0))
            .build()
            .unwrap();
        assert_eq!(style.eye().settings()[keys::CORNER_RADIUS_FRACTION], SettingValue::Float(0.5));
        assert_eq!(style.pupil().name(), "pixels");
        assert_eq!(style.pupil().settings()[keys::CORNER_RADIUS_FRACTION], SettingValue::Float(1.0));
    }

    #[test]
    fn test_unknown_names() {
        let err = StyleBuilder::new().eye("nope").build().unwrap_err();
        assert_eq!(err, ShapeError::UnknownGeneratorName("nope".to_string()));
        let err = StyleBuilder::new().pupil("ufo").build().unwrap_err();
        assert_eq!(err, ShapeError::UnknownGeneratorName("ufo".to_string()));
    }
}
