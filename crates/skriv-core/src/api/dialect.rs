//! Backend dialect probe tables
//!
//! One table per operation: the ordered list of endpoint candidates the
//! client tries against each configured base URL. Modern JSON REST
//! candidates come first, legacy form/redirect candidates last. The
//! absence of a legacy candidate (delete) is itself part of the
//! contract: running out of candidates means the operation has no
//! backend equivalent in that dialect.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::Method;

/// How a request body is encoded on the wire
///
/// The encoding doubles as a dialect marker: form-encoded candidates
/// belong to the legacy dialect and carry its conventions (redirect
/// after create, id inside the update body).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Form,
}

/// One endpoint candidate for an operation
#[derive(Debug, Clone)]
pub struct Candidate {
    pub method: Method,
    /// Path template; `{id}` is replaced with the encoded document id
    pub path: &'static str,
    pub encoding: Encoding,
}

impl Candidate {
    /// Resolve the path template against a document id
    pub fn path_for(&self, id: Option<&str>) -> String {
        match id {
            Some(id) => self.path.replace("{id}", &encode_segment(id)),
            None => self.path.to_string(),
        }
    }
}

/// The operations a backend can be asked to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Endpoint candidates for this operation, in probe order
    pub fn candidates(self) -> &'static [Candidate] {
        match self {
            Operation::List => LIST,
            Operation::Get => GET,
            Operation::Create => CREATE,
            Operation::Update => UPDATE,
            Operation::Delete => DELETE,
        }
    }
}

static LIST: &[Candidate] = &[
    Candidate {
        method: Method::GET,
        path: "/docs",
        encoding: Encoding::Json,
    },
    Candidate {
        method: Method::GET,
        path: "/api/docs",
        encoding: Encoding::Json,
    },
    Candidate {
        method: Method::GET,
        path: "/list",
        encoding: Encoding::Json,
    },
];

static GET: &[Candidate] = &[
    Candidate {
        method: Method::GET,
        path: "/docs/{id}",
        encoding: Encoding::Json,
    },
    Candidate {
        method: Method::GET,
        path: "/api/docs/{id}",
        encoding: Encoding::Json,
    },
];

static CREATE: &[Candidate] = &[
    Candidate {
        method: Method::POST,
        path: "/docs",
        encoding: Encoding::Json,
    },
    Candidate {
        method: Method::POST,
        path: "/api/docs",
        encoding: Encoding::Json,
    },
    Candidate {
        method: Method::POST,
        path: "/",
        encoding: Encoding::Form,
    },
];

static UPDATE: &[Candidate] = &[
    Candidate {
        method: Method::PUT,
        path: "/docs/{id}",
        encoding: Encoding::Json,
    },
    Candidate {
        method: Method::PUT,
        path: "/api/docs/{id}",
        encoding: Encoding::Json,
    },
    Candidate {
        method: Method::POST,
        path: "/update",
        encoding: Encoding::Form,
    },
];

// No legacy candidate: the form dialect has no known delete endpoint.
static DELETE: &[Candidate] = &[
    Candidate {
        method: Method::DELETE,
        path: "/docs/{id}",
        encoding: Encoding::Json,
    },
    Candidate {
        method: Method::DELETE,
        path: "/api/docs/{id}",
        encoding: Encoding::Json,
    },
];

/// Characters that cannot appear raw inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}
