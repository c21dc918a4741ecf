/*!

This is the long-form manual for `topsis_ranking` and `topsisrank`.

## The dataset

The input is a rectangular table. The first column is the row label: it is
carried through unchanged and never used numerically. Every other column is a
criterion, except columns literally named `Score` or `Rank`, which are assumed
to come from a previous run and are recomputed. All criterion cells must hold
numbers (or text that parses as a number); a single non-numeric cell fails the
whole run rather than silently skewing the ranking.

```text
Model,Price,Storage
m-1,250,16
m-2,200,16
m-3,300,32
m-4,275,32
```

## Weights and impacts

Both parameters are comma-separated strings with exactly one token per
criterion column, in column order.

* a weight is any finite real number. The algorithm is scale-invariant per
  column but not across the weight vector as a whole: normalize the weights
  yourself if comparability across runs matters.
* an impact is `+` (higher is better) or `-` (lower is better). Any other
  token is rejected.

## The output

The ranked table is the input table with two columns appended:

* `Score`: the closeness coefficient in `[0, 1]`, formatted to 4 decimal
  places. Higher is better.
* `Rank`: a dense 1-based rank, 1 marking the best row. Rows with equal
  scores keep their input order and receive consecutive distinct ranks.

Rows are not reordered; the ranking is expressed only through the `Rank`
column, so the output can be joined back to the input positionally.

## Input formats supported by the command line tool

* `csv`: the first row is the header with the column names.
* `excel`: an `.xlsx` workbook. When the workbook has a single worksheet it is
  picked up automatically; otherwise pass `--excel-worksheet-name`.

## Configuration

`topsisrank` also accepts a JSON run configuration through `--config`:

```json
{
    "outputSettings": {
        "analysisName": "phones",
        "outputPath": "phones_ranked.csv"
    },
    "datasetSource": {
        "provider": "csv",
        "filePath": "phones.csv"
    },
    "weights": "1,1",
    "impacts": "+,+"
}
```

`filePath` is resolved relative to the configuration file. Command line flags
take precedence over the values in the configuration.

*/
