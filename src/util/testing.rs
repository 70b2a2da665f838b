use std::sync::Once;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{BinaryTree, Side, Value};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Fixture node description: `(value, left, right)`.
pub enum Shape {
    Empty,
    Node(Value, Box<Shape>, Box<Shape>),
}

impl Shape {
    pub fn leaf(value: Value) -> Self {
        Shape::Node(value, Box::new(Shape::Empty), Box::new(Shape::Empty))
    }

    pub fn node(value: Value, left: Shape, right: Shape) -> Self {
        Shape::Node(value, Box::new(left), Box::new(right))
    }
}

/// Builds a tree with an exact shape, for tests that need fixed layouts.
pub fn tree_from_shape(shape: &Shape) -> BinaryTree {
    let mut tree = BinaryTree::new();
    let mut stack = vec![(shape, None)];
    while let Some((shape, parent)) = stack.pop() {
        if let Shape::Node(value, left, right) = shape {
            let idx = tree.insert_node(*value, parent);
            stack.push((&**right, Some((idx, Side::Right))));
            stack.push((&**left, Some((idx, Side::Left))));
        }
    }
    tree
}
