// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to accomplish one
// command (building vocabularies, tensorizing, rendering).
//
// Rules for this layer:
//   - No encoding or padding logic here (that's Layer 4)
//   - No printing here (that's Layer 1)
//   - Only workflow coordination, with anyhow context on I/O

// Build and optionally save the symbol tables
pub mod vocab_use_case;

// Load, tensorize, and iterate one minibatch pass
pub mod tensorize_use_case;

// Tensorize and decode back to tab-separated text
pub mod render_use_case;
