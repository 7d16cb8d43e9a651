mod run;
mod targets;

#[cfg(test)]
mod tests;

pub(crate) use run::run_probe;
pub(crate) use targets::load_targets;
