pub mod model_record;
