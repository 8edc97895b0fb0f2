//! The back-end contract and the built-in registry.
//!
//! A back-end consumes a fully parsed, symbol-resolved (not
//! template-instantiated) top-level module and writes to a caller
//! supplied stream. The driver writes one output file per registered
//! back-end, named after the input plus the back-end's extension.
//!
//! RTL emission lives outside this repository; the registry ships a
//! single structured-dump back-end as the placeholder consumer.

use std::io::{self, Write};

use hdlc_ast::{build_dump_graph, TopLevelModule};
use hdlc_util::source::Source;

/// A constructed code generator, ready to run once.
pub trait Generator {
    fn run<'a>(
        &mut self,
        module: &'a TopLevelModule<'a>,
        source: &Source,
        out: &mut dyn Write,
    ) -> io::Result<()>;
}

/// A registered back-end: a name, an output extension, and a generator
/// factory.
pub trait Backend {
    fn name(&self) -> &str;

    /// Appended to the input file name, including the leading dot.
    fn output_extension(&self) -> &str;

    fn construct(&self) -> Box<dyn Generator>;
}

/// All back-ends known to this driver.
pub fn backends() -> Vec<Box<dyn Backend>> {
    vec![Box::new(JsonDumpBackend)]
}

/// Writes the structured dump as JSON.
struct JsonDumpBackend;

impl Backend for JsonDumpBackend {
    fn name(&self) -> &str {
        "json-dump"
    }

    fn output_extension(&self) -> &str {
        ".dump.json"
    }

    fn construct(&self) -> Box<dyn Generator> {
        Box::new(JsonDumpGenerator)
    }
}

struct JsonDumpGenerator;

impl Generator for JsonDumpGenerator {
    fn run<'a>(
        &mut self,
        module: &'a TopLevelModule<'a>,
        source: &Source,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let (graph, root) = build_dump_graph(module, source);
        out.write_all(graph.to_json(Some(root)).as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_json_dump() {
        let backends = backends();
        assert_eq!(backends.len(), 1);
        assert_eq!(backends[0].name(), "json-dump");
        assert!(backends[0].output_extension().starts_with('.'));
    }
}
