mod model_configs;
mod screens;
