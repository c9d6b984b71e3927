// ============================================================
// Layer 2 — RenderUseCase
// ============================================================
// Round-trip check for a training file: tensorize it, then
// decode the tensors straight back into tab-separated text.
// A faithful pipeline prints the input file again (modulo
// truncation and blank-line normalisation).

use anyhow::Result;

use crate::application::tensorize_use_case::{TensorizeRequest, TensorizeUseCase};
use crate::data::dataset::TRAIN;

pub struct RenderUseCase {
    request: TensorizeRequest,
}

impl RenderUseCase {
    pub fn new(request: TensorizeRequest) -> Self {
        Self { request }
    }

    pub fn execute(&self) -> Result<String> {
        let dataset = TensorizeUseCase::new(self.request.clone()).prepare()?;
        let t = dataset.tensors(TRAIN)?;
        let rendered = dataset.render_predictions(
            &t.text,
            &t.pos,
            &t.labels,
            t.depth.as_ref(),
            Some(&t.text_mask),
        )?;
        tracing::info!("Rendered {} sentences", t.len());
        Ok(rendered)
    }
}
