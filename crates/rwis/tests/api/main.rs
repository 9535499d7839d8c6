mod assemble_inputs;
mod resolve_observations;
