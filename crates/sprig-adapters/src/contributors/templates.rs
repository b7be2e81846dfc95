//! Source templates, rendered with [`crate::render::RenderContext`].

use sprig_core::domain::LanguageId;

/// The kinds of source file the built-in contributors write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    MainClass,
    TestClass,
    ServletInitializer,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [Self::MainClass, Self::TestClass, Self::ServletInitializer];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MainClass => "main-class",
            Self::TestClass => "test-class",
            Self::ServletInitializer => "servlet-initializer",
        }
    }

    /// `main` or `test`.
    pub const fn source_set(&self) -> &'static str {
        match self {
            Self::TestClass => "test",
            Self::MainClass | Self::ServletInitializer => "main",
        }
    }

    /// File stem, with `{{applicationName}}` placeholders.
    pub const fn file_stem(&self) -> &'static str {
        match self {
            Self::MainClass => "{{applicationName}}",
            Self::TestClass => "{{applicationName}}Tests",
            Self::ServletInitializer => "ServletInitializer",
        }
    }
}

pub fn template(language: LanguageId, kind: SourceKind) -> &'static str {
    match (language, kind) {
        (LanguageId::Java, SourceKind::MainClass) => JAVA_MAIN,
        (LanguageId::Java, SourceKind::TestClass) => JAVA_TEST,
        (LanguageId::Java, SourceKind::ServletInitializer) => JAVA_SERVLET,
        (LanguageId::Kotlin, SourceKind::MainClass) => KOTLIN_MAIN,
        (LanguageId::Kotlin, SourceKind::TestClass) => KOTLIN_TEST,
        (LanguageId::Kotlin, SourceKind::ServletInitializer) => KOTLIN_SERVLET,
        (LanguageId::Groovy, SourceKind::MainClass) => GROOVY_MAIN,
        (LanguageId::Groovy, SourceKind::TestClass) => GROOVY_TEST,
        (LanguageId::Groovy, SourceKind::ServletInitializer) => GROOVY_SERVLET,
        (LanguageId::Scala, SourceKind::MainClass) => SCALA_MAIN,
        (LanguageId::Scala, SourceKind::TestClass) => SCALA_TEST,
        (LanguageId::Scala, SourceKind::ServletInitializer) => SCALA_SERVLET,
    }
}

// ── Java ─────────────────────────────────────────────────────────────────────

const JAVA_MAIN: &str = "\
package {{packageName}};

import org.springframework.boot.SpringApplication;
import org.springframework.boot.autoconfigure.SpringBootApplication;

@SpringBootApplication
public class {{applicationName}} {

    public static void main(String[] args) {
        SpringApplication.run({{applicationName}}.class, args);
    }

}
";

const JAVA_TEST: &str = "\
package {{packageName}};

import org.junit.Test;
import org.junit.runner.RunWith;
import org.springframework.boot.test.context.SpringBootTest;
import org.springframework.test.context.junit4.SpringRunner;

@RunWith(SpringRunner.class)
@SpringBootTest
public class {{applicationName}}Tests {

    @Test
    public void contextLoads() {
    }

}
";

const JAVA_SERVLET: &str = "\
package {{packageName}};

import org.springframework.boot.builder.SpringApplicationBuilder;
import org.springframework.boot.web.servlet.support.SpringBootServletInitializer;

public class ServletInitializer extends SpringBootServletInitializer {

    @Override
    protected SpringApplicationBuilder configure(SpringApplicationBuilder application) {
        return application.sources({{applicationName}}.class);
    }

}
";

// ── Kotlin ───────────────────────────────────────────────────────────────────

const KOTLIN_MAIN: &str = "\
package {{packageName}}

import org.springframework.boot.autoconfigure.SpringBootApplication
import org.springframework.boot.runApplication

@SpringBootApplication
class {{applicationName}}

fun main(args: Array<String>) {
    runApplication<{{applicationName}}>(*args)
}
";

const KOTLIN_TEST: &str = "\
package {{packageName}}

import org.junit.Test
import org.junit.runner.RunWith
import org.springframework.boot.test.context.SpringBootTest
import org.springframework.test.context.junit4.SpringRunner

@RunWith(SpringRunner::class)
@SpringBootTest
class {{applicationName}}Tests {

    @Test
    fun contextLoads() {
    }

}
";

const KOTLIN_SERVLET: &str = "\
package {{packageName}}

import org.springframework.boot.builder.SpringApplicationBuilder
import org.springframework.boot.web.servlet.support.SpringBootServletInitializer

class ServletInitializer : SpringBootServletInitializer() {

    override fun configure(application: SpringApplicationBuilder): SpringApplicationBuilder {
        return application.sources({{applicationName}}::class.java)
    }

}
";

// ── Groovy ───────────────────────────────────────────────────────────────────

const GROOVY_MAIN: &str = "\
package {{packageName}}

import org.springframework.boot.SpringApplication
import org.springframework.boot.autoconfigure.SpringBootApplication

@SpringBootApplication
class {{applicationName}} {

    static void main(String[] args) {
        SpringApplication.run({{applicationName}}, args)
    }

}
";

const GROOVY_TEST: &str = "\
package {{packageName}}

import org.junit.Test
import org.junit.runner.RunWith
import org.springframework.boot.test.context.SpringBootTest
import org.springframework.test.context.junit4.SpringRunner

@RunWith(SpringRunner)
@SpringBootTest
class {{applicationName}}Tests {

    @Test
    void contextLoads() {
    }

}
";

const GROOVY_SERVLET: &str = "\
package {{packageName}}

import org.springframework.boot.builder.SpringApplicationBuilder
import org.springframework.boot.web.servlet.support.SpringBootServletInitializer

class ServletInitializer extends SpringBootServletInitializer {

    @Override
    protected SpringApplicationBuilder configure(SpringApplicationBuilder application) {
        application.sources({{applicationName}})
    }

}
";

// ── Scala ────────────────────────────────────────────────────────────────────

const SCALA_MAIN: &str = "\
package {{packageName}}

import org.springframework.boot.SpringApplication
import org.springframework.boot.autoconfigure.SpringBootApplication

@SpringBootApplication
class {{applicationName}}

object {{applicationName}} {

  def main(args: Array[String]): Unit =
    SpringApplication.run(classOf[{{applicationName}}], args: _*)

}
";

const SCALA_TEST: &str = "\
package {{packageName}}

import org.junit.Test
import org.junit.runner.RunWith
import org.springframework.boot.test.context.SpringBootTest
import org.springframework.test.context.junit4.SpringRunner

@RunWith(classOf[SpringRunner])
@SpringBootTest
class {{applicationName}}Tests {

  @Test
  def contextLoads(): Unit = {
  }

}
";

const SCALA_SERVLET: &str = "\
package {{packageName}}

import org.springframework.boot.builder.SpringApplicationBuilder
import org.springframework.boot.web.servlet.support.SpringBootServletInitializer

class ServletInitializer extends SpringBootServletInitializer {

  override protected def configure(application: SpringApplicationBuilder): SpringApplicationBuilder =
    application.sources(classOf[{{applicationName}}])

}
";
