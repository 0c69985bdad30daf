use crate::models::{DesignParameters, ModelReference};

/// Builds the single instruction sent after the image parts.
pub fn build_instruction(model: &ModelReference<'_>, design: &DesignParameters) -> String {
    let subject = match model {
        ModelReference::Uploaded(_) => {
            "the person shown in the second image (keep their face, body shape, skin tone and pose)"
                .to_string()
        }
        ModelReference::Preset(preset) => preset.subject().to_string(),
    };

    format!(
        "The first image is a clothing design sketch. Turn it into a real garment and dress {subject} in it. \
Design description: {description}. \
Realism level: {realism}% (0% = loose interpretation of the sketch, 100% = indistinguishable from a real photograph). \
Produce exactly one photorealistic image that looks like an actual fashion photo shoot, with natural lighting, \
realistic fabric texture, folds and stitching. Do not return an illustration, drawing or AI-styled artwork, \
and do not include the sketch itself in the output.",
        subject = subject,
        description = design.effective_description(),
        realism = design.realism(),
    )
}
