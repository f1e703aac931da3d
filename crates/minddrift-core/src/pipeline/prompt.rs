//! Prompt builders. Pure string templating, no I/O.

fn render_answers<S: AsRef<str>>(answers: &[S]) -> String {
    if answers.is_empty() {
        return "(no answers yet)".to_string();
    }
    answers
        .iter()
        .enumerate()
        .map(|(i, a)| format!("{}. {}", i + 1, a.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn guess_prompt<S: AsRef<str>>(answers: &[S]) -> String {
    format!(
        "TASK: You are the mind behind a guessing game.\n\
         The player answered these questions about the object they are thinking of:\n\
         <answers>\n{}\n</answers>\n\n\
         RULES:\n\
         1. Guess only PHYSICAL, CONCRETE objects or characters. Abstract concepts are not allowed.\n\
         2. The guess must be consistent with every answer above.\n\
         3. Output only the name of the object: a single word or a short noun phrase. \
         Write nothing else (no explanation, no punctuation, no quotes).\n\n\
         GUESS:",
        render_answers(answers)
    )
}

pub(crate) fn synthesize_prompt(label: &str) -> String {
    format!(
        r#"You are an expert Three.js developer.
GOAL: Build a single, self-contained HTML page showing a 3D scene of "{label}".

JAVASCRIPT RULES (DO NOT CHANGE THIS ORDER):
1. Put an IMPORT MAP in the <head>:
   <script type="importmap">
   {{ "imports": {{ "three": "https://unpkg.com/three@0.160.0/build/three.module.js", "three/addons/": "https://unpkg.com/three@0.160.0/examples/jsm/" }} }}
   </script>
2. Open a <script type="module"> block.
3. Put the imports FIRST (they must NOT be inside try/catch):
   import * as THREE from 'three';
   import {{ OrbitControls }} from 'three/addons/controls/OrbitControls.js';
4. After the imports, open a try {{ ... }} catch (e) {{ ... }} block and build the whole scene (scene, camera, renderer, object) inside it.
5. In the catch block show the error: document.body.innerHTML = `<h1 style="color:red">${{e.message}}</h1>`;

SCENE:
- Background: scene.background = new THREE.Color(0x333333);
- Lights: add BOTH an AmbientLight and a DirectionalLight.
- Object: approximate "{label}" with primitive geometry only (Group, Box, Sphere, Cylinder, Cone, Torus). Do NOT load external models or textures.
- Animation: the object slowly rotates around its vertical axis.

BUTTONS (top left, exactly these three, no others):
- id 'btn-accept', label "Correct!": window.opener.postMessage({{ type: 'minddrift:confirm', prediction: "{label}", html: document.documentElement.outerHTML }}, '*'); then window.close();
- id 'btn-retry', label "Wrong, ask 5 more": window.opener.postMessage({{ type: 'minddrift:continue' }}, '*'); then window.close();
- id 'btn-quit', label "Quit": window.close();
Guard every window.opener call with `if (window.opener)`.

OUTPUT FORMAT:
Return only the raw HTML document, starting with <!DOCTYPE html>. Do not use Markdown fences."#
    )
}

pub(crate) fn questions_prompt<S: AsRef<str>>(answers: &[S]) -> String {
    format!(
        r#"You are a guessing game.
The player's answers so far:
<answers>
{}
</answers>

Our previous guess was WRONG.
Write 5 NEW questions that best split the objects still consistent with these answers.
Do not repeat questions that were already answered. Each question must be answerable with yes or no.

FORMAT (strict JSON, nothing else):
{{
  "questions": [
    {{"id": 101, "text": "Question 1?"}},
    {{"id": 102, "text": "Question 2?"}}
  ]
}}
Use ids 101 to 105."#,
        render_answers(answers)
    )
}
