pub(crate) mod chart_spec;
