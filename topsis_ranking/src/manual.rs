/*!

This is the long-form manual for `topsis_ranking` and the `topsis` command line program.

## The method

TOPSIS (Technique for Order Preference by Similarity to Ideal Solution) ranks a set of
alternatives evaluated on several criteria. Each criterion has a weight (its importance)
and an impact: `+` when higher values are better, `-` when lower values are better.

1. every column is divided by its Euclidean norm, so that the criteria become comparable
 regardless of their unit;
2. every column is multiplied by its weight (the weights are normalized to sum to 1);
3. the ideal best and ideal worst values are taken per column (maximum and minimum for a `+`
 criterion, the reverse for a `-` criterion);
4. the score of an alternative is `d- / (d+ + d-)` where `d+` and `d-` are the Euclidean
 distances to the ideal best and ideal worst vectors.

Scores are between 0 and 1; the higher, the better. When an alternative is at zero
distance from both ideals (for example when all the alternatives are identical), its score is 0.5.

Giving more weight to a criterion on which one alternative leads all the others never lowers
the score of that alternative. It may still lose places when there are three alternatives or
more: another alternative can gain more from the same change.

## Input formats

### `csv`

The first column is the name of the alternative; it is never interpreted. All the other
columns must be numeric. The first row is a header by default (use `--no-headers` otherwise).

```text
Model,Price,Storage,Camera,Looks
M1,250,16,12,5
M2,200,16,8,3
M3,300,32,16,4
```

### `xlsx`

The same layout, in an Excel worksheet. Use `--excel-worksheet-name` when the workbook
contains more than one worksheet; otherwise the first one is used.

## Output

The output is the input table with two more columns: `Topsis Score` and `Rank`.

```text
Model,Price,Storage,Camera,Looks,Topsis Score,Rank
M1,250,16,12,5,0.534277,3
M2,200,16,8,3,0.422351,4
M3,300,32,16,4,0.577649,2
```

A JSON summary (scores, distances, ideal vectors) can also be written with `--summary`.

## Ties

Scores that are exactly equal are ties. The order of the ranking always keeps the input
order for ties. The rank numbers depend on the tie mode:

| mode          | example |
|---------------|---------|
| `competition` | 1 2 2 4 |
| `dense`       | 1 2 2 3 |
| `ordinal`     | 1 2 3 4 |

`competition` is the default.

## Configuration

Instead of passing every option on the command line, a JSON file can be given with `--config`.
Options given on the command line take precedence.

```json
{
  "outputSettings": {
    "outputDirectory": "outputs",
    "outputFileName": "topsis_result.csv",
    "summaryFile": "summary.json",
    "precision": 6
  },
  "inputSource": {
    "provider": "csv",
    "filePath": "data.csv",
    "hasHeaders": true
  },
  "criteria": {
    "weights": "1,1,1,2",
    "impacts": ["+", "+", "-", "+"]
  },
  "rules": {
    "tieMode": "competition"
  }
}
```

Relative paths are resolved from the directory of the configuration file.
The weights and the impacts may be written either as a comma-separated string or as a list.

 */
