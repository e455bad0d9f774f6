pub mod chart_pipeline;
