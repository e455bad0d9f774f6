use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ChartEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ChartEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<Vec<String>> {
        tracing::info!("Building settings chart...");

        let inputs = self.pipeline.extract()?;
        tracing::info!("Prepared {} chart point(s)", inputs.len());

        let result = self.pipeline.transform(inputs)?;
        tracing::info!("Computed {} chart row(s)", result.rows.len());

        let written = self.pipeline.load(result)?;
        for path in &written {
            tracing::info!("Chart saved to: {}", path);
        }

        Ok(written)
    }
}
