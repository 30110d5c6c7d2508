//! End-to-end forward-pass tests for the translation pipeline.
//! Run with: cargo test -p verso-nn

use std::sync::atomic::AtomicBool;

use verso_core::{Matrix, Vocabulary};
use verso_nn::{Decoder, EmbeddingTable, Encoder, ModelConfig, Translator};

fn assert_close(a: &[f32], b: &[f32], tol: f32) {
    assert_eq!(a.len(), b.len(), "length mismatch: {} vs {}", a.len(), b.len());
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        assert!(
            (x - y).abs() < tol,
            "element {} differs: {} vs {} (tol={})",
            i, x, y, tol
        );
    }
}

/// The wiring scenario: vocabulary {a, b, c}, embedding_dim = 2,
/// hidden_dim = 2, fixed identity-like embeddings, all recurrence
/// parameters zero. The context must equal tanh(0) = [0, 0] regardless
/// of the input sequence.
#[test]
fn test_zero_parameter_wiring() {
    let embeddings = Matrix::from_vec(2, 3, vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0]).unwrap();
    let encoder =
        Encoder::from_parts(Matrix::zeros(2, 2), Matrix::zeros(2, 2), vec![0.0, 0.0]).unwrap();

    let table = EmbeddingTable::from_matrix(embeddings);
    for tokens in [&["a"][..], &["b", "c"][..], &["c", "b", "a"][..]] {
        let vocab = Vocabulary::from_tokens(["a", "b", "c"]);
        let ids = vocab.encode_sequence(tokens).unwrap();
        let embedded = table.lookup_sequence(&ids).unwrap();
        let context = encoder.forward(&embedded).unwrap();
        assert_close(&context, &[0.0, 0.0], 1e-9);
    }
}

#[test]
fn test_full_pipeline_on_parallel_verses() {
    let english = [
        "in the beginning",
        "and the earth was void",
        "let there be light",
    ];
    let spanish = ["en el principio", "y la tierra estaba vacia", "haya luz"];

    let tokenize = |s: &str| s.split_whitespace().map(String::from).collect::<Vec<_>>();
    let source_vocab = Vocabulary::from_tokens(english.iter().flat_map(|v| v.split_whitespace()));
    let target_vocab = Vocabulary::from_tokens(spanish.iter().flat_map(|v| v.split_whitespace()));
    let target_vocab_len = target_vocab.len();

    let config = ModelConfig {
        embedding_dim: 8,
        hidden_dim: 4,
        seed: 123,
    };
    let translator = Translator::new(config, source_vocab, target_vocab);

    let pairs: Vec<(Vec<String>, Vec<String>)> = english
        .iter()
        .zip(&spanish)
        .map(|(e, s)| (tokenize(e), tokenize(s)))
        .collect();

    let cancel = AtomicBool::new(false);
    let results = translator.translate_corpus(&pairs, &cancel);
    assert_eq!(results.len(), 3);

    for (result, (_, target)) in results.iter().zip(&pairs) {
        let translation = result.as_ref().expect("verse should translate");
        // teacher-length decoding: one step per reference token
        assert_eq!(translation.ids.len(), target.len());
        assert_eq!(translation.tokens.len(), target.len());
        assert_eq!(translation.distances.len(), target.len());
        assert!(translation.distances.iter().all(|&d| d >= 0.0 && d.is_finite()));
        // every decoded id maps back into the target vocabulary
        assert!(translation.ids.iter().all(|&id| id < target_vocab_len));
    }
}

#[test]
fn test_same_seed_same_translations_across_runs() {
    let vocab = || Vocabulary::from_tokens(["alpha", "beta", "gamma", "delta"]);
    let config = ModelConfig {
        embedding_dim: 6,
        hidden_dim: 3,
        seed: 99,
    };
    let first = Translator::new(config, vocab(), vocab())
        .translate(&["beta", "delta", "alpha"], 4)
        .unwrap();
    let second = Translator::new(config, vocab(), vocab())
        .translate(&["beta", "delta", "alpha"], 4)
        .unwrap();
    assert_eq!(first.ids, second.ids);
    assert_eq!(first.distances, second.distances);
}

#[test]
fn test_explicit_decoder_matches_manual_recurrence() {
    // hidden_dim = 1, embedding_dim = 1: every step is scalar arithmetic we
    // can replay by hand against the decoder's output vectors.
    let table = EmbeddingTable::from_matrix(Matrix::from_vec(1, 2, vec![0.0, 1.0]).unwrap());
    let decoder = Decoder::from_parts(
        Matrix::from_vec(1, 1, vec![0.5]).unwrap(), // initial
        Matrix::from_vec(1, 1, vec![0.25]).unwrap(), // U'
        Matrix::from_vec(1, 1, vec![0.5]).unwrap(), // W'
        Matrix::from_vec(1, 1, vec![0.1]).unwrap(), // C'
        vec![0.05],                                 // bias'
        Matrix::from_vec(1, 1, vec![2.0]).unwrap(), // V
        vec![0.0],                                  // output bias
    )
    .unwrap();

    let context = 0.8f32;
    let mut hidden = (0.5 * context).tanh();
    let mut output = 2.0 * hidden;
    let steps = decoder.decode(&[context], 3, &table).unwrap();
    assert_close(&steps[0].vector, &[output], 1e-6);

    for step in &steps[1..] {
        hidden = 0.25 * hidden + 0.5 * output + 0.1 * context + 0.05;
        output = 2.0 * hidden;
        assert_close(&step.vector, &[output], 1e-6);
    }
}
