//! Build descriptor serializers.

mod gradle;
mod maven;

use std::sync::Arc;

use sprig_core::application::ports::BuildSerializer;

pub use gradle::GradleBuildSerializer;
pub use maven::MavenPomSerializer;

/// One serializer per supported build system.
pub fn default_serializers() -> Vec<Arc<dyn BuildSerializer>> {
    vec![Arc::new(MavenPomSerializer), Arc::new(GradleBuildSerializer)]
}

/// Tab-indented text buffer.
#[derive(Debug, Default)]
struct Writer {
    out: String,
}

impl Writer {
    fn line(&mut self, depth: usize, text: impl AsRef<str>) {
        for _ in 0..depth {
            self.out.push('\t');
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn finish(self) -> String {
        self.out
    }
}
