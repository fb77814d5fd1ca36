use ndarray::{Array1, Array2};

/// Log-domain Viterbi decoding.
///
/// # Arguments
/// * `p_e` - Emission probabilities, shape `(num_states, num_observations)`
/// * `p_t` - Transition probabilities, shape `(num_states, num_states)`,
///   `p_t[[i, j]]` being the probability of moving from state `i` to `j`
/// * `p_s` - Start probabilities, length `num_states`
///
/// # Returns
/// Returns the most likely state sequence and the accumulated log
/// probabilities per state and observation. Zero probabilities are legal and
/// become `-inf` in the log domain.
pub fn viterbi_log(
    p_e: &Array2<f32>,
    p_t: &Array2<f32>,
    p_s: &Array1<f32>,
) -> (Vec<usize>, Array2<f32>) {
    let num_states = p_e.nrows();
    let num_obs = p_e.ncols();
    if num_obs == 0 {
        return (Vec::new(), Array2::zeros((num_states, 0)));
    }

    let log_e = p_e.mapv(f32::ln);
    let log_t = p_t.mapv(f32::ln);
    let log_s = p_s.mapv(f32::ln);

    let mut back = Array2::<usize>::zeros((num_states, num_obs));
    let mut prob = Array2::<f32>::zeros((num_states, num_obs));

    for s in 0..num_states {
        prob[[s, 0]] = log_e[[s, 0]] + log_s[s];
    }

    for n in 1..num_obs {
        for s in 0..num_states {
            let mut best = f32::NEG_INFINITY;
            let mut best_idx = 0;
            for prev in 0..num_states {
                let p = prob[[prev, n - 1]] + log_t[[prev, s]];
                if p > best {
                    best = p;
                    best_idx = prev;
                }
            }
            back[[s, n]] = best_idx;
            prob[[s, n]] = log_e[[s, n]] + best;
        }
    }

    let mut path = vec![0usize; num_obs];
    let mut best = f32::NEG_INFINITY;
    for s in 0..num_states {
        if prob[[s, num_obs - 1]] > best {
            best = prob[[s, num_obs - 1]];
            path[num_obs - 1] = s;
        }
    }
    for n in (0..num_obs - 1).rev() {
        path[n] = back[[path[n + 1], n + 1]];
    }

    (path, prob)
}
