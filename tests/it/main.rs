/*! Integration tests for list-reconciler.
 *
 * All integration tests are compiled into a single test binary. The modules mirror the public
 * surface of the library:
 * - reconcile: find-or-insert and last-marker behavior on plain and observable models
 * - model: the `VecModel` change notifications as seen by a UI binding layer
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("list_reconciler=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod helpers;
mod model;
mod reconcile;
